//! Tests for the check macros as seen from another crate.

use crate::common::{expect_failure, save, setting, ConfigError, DiskFull, SaveFailed};
use std::error::Error;
use std::num::ParseIntError;
use verdict::{
    check_eq, check_fail, check_false, check_ge, check_le, check_ne, check_throws,
    check_throws_any, check_throws_matching, check_true, Failure, Fault, Panicked, TestResult,
};

// ============================================================================
// VALUE CHECKS
// ============================================================================

fn mismatched_lengths() -> TestResult {
    let word = "sorex";
    check_eq!(word.len(), 4, "five letters");
    Ok(())
}

#[test]
fn test_eq_failure_is_self_locating() {
    let failure = expect_failure(mismatched_lengths());
    assert_eq!(failure.file(), file!());
    assert!(failure.function().ends_with("mismatched_lengths"));
    assert_eq!(
        failure.message(),
        "Equality test failed: word.len() != 4 (five letters)\nword.len() = 5\n4 = 4"
    );
}

#[test]
fn test_passing_checks_fall_through() {
    fn all_hold() -> TestResult {
        check_eq!(String::from("a") + "b", "ab");
        check_ne!(0.1 + 0.2, 0.3);
        check_true!(u32::MAX.checked_add(1).is_none());
        check_false!(i8::MIN.checked_neg().is_some());
        check_ge!(10, 10);
        check_le!(-1, 0);
        Ok(())
    }
    assert!(all_hold().is_ok());
}

#[test]
fn test_ne_reports_shared_value() {
    fn same() -> TestResult {
        let a = 7;
        check_ne!(a, 3 + 4);
        Ok(())
    }
    let failure = expect_failure(same());
    assert_eq!(failure.message(), "Inequality test failed: a == 3 + 4 (== 7)");
}

#[test]
fn test_comparisons_name_the_relation_that_held() {
    fn too_low() -> TestResult {
        let score = 3;
        check_ge!(score, 10);
        Ok(())
    }
    fn too_high() -> TestResult {
        let score = 30;
        check_le!(score, 10);
        Ok(())
    }
    assert_eq!(
        expect_failure(too_low()).message(),
        "Comparison failed: score < 10\nscore = 3\n10 = 10"
    );
    assert_eq!(
        expect_failure(too_high()).message(),
        "Comparison failed: score > 10\nscore = 30\n10 = 10"
    );
}

#[test]
fn test_operands_evaluate_once() {
    fn counted(calls: &mut u32) -> TestResult {
        let mut next = || {
            *calls += 1;
            *calls
        };
        check_eq!(next(), 1);
        check_ge!(next(), 2);
        Ok(())
    }
    let mut calls = 0;
    assert!(counted(&mut calls).is_ok());
    assert_eq!(calls, 2);
}

#[test]
fn test_fail_formats_arguments() {
    fn unreachable_branch(state: &str) -> TestResult {
        check_fail!("reached state {:?}", state);
    }
    let failure = expect_failure(unreachable_branch("closed"));
    assert_eq!(failure.message(), "reached state \"closed\"");
}

#[test]
fn test_checks_in_bare_failure_results() {
    fn strict() -> Result<u8, Failure> {
        check_true!(1 > 2);
        Ok(1)
    }
    let failure = strict().unwrap_err();
    assert!(failure.message().starts_with("Equality test failed: 1 > 2 != true"));
}

// ============================================================================
// ERROR EXPECTATIONS
// ============================================================================

#[test]
fn test_throws_accepts_wrapped_kind() {
    fn snapshot() -> TestResult {
        check_throws!(save(4096), SaveFailed);
        check_throws!(save(4096), DiskFull);
        check_throws!("x".parse::<u8>(), ParseIntError);
        Ok(())
    }
    assert!(snapshot().is_ok());
}

#[test]
fn test_throws_reports_missing_error() {
    fn small_save() -> TestResult {
        check_throws!(save(10), DiskFull);
        Ok(())
    }
    assert_eq!(
        expect_failure(small_save()).message(),
        "Failed to raise an error of type DiskFull"
    );
}

#[test]
fn test_throws_reports_other_error() {
    fn lookup() -> TestResult {
        check_throws!(setting(&[], "port"), DiskFull);
        Ok(())
    }
    assert_eq!(
        expect_failure(lookup()).message(),
        "An unexpected error was raised, was expecting type DiskFull. \
         Error message is: missing key port"
    );
}

fn boxed_setting(raw: &str) -> Result<u32, Box<dyn Error>> {
    Ok(raw.parse::<u32>()?)
}

#[test]
fn test_throws_accepts_plain_values_and_boxed_errors() {
    fn probes() -> TestResult {
        let divisor = 0_u32;
        check_throws!(100_u32.checked_div(divisor).unwrap(), Panicked);
        check_throws!(boxed_setting("eighty"), ParseIntError);
        check_throws_any!(boxed_setting("-1"));
        Ok(())
    }
    assert!(probes().is_ok());

    fn plain_value() -> TestResult {
        check_throws_any!(100_u32 / 4);
        Ok(())
    }
    assert_eq!(
        expect_failure(plain_value()).message(),
        "Failed to raise an error of any type"
    );

    fn propagated() -> TestResult {
        let port = boxed_setting("8080").map_err(Fault::from_boxed)?;
        check_eq!(port, 8080);
        boxed_setting("x").map_err(Fault::from_boxed)?;
        Ok(())
    }
    assert!(matches!(propagated(), Err(Fault::Error(e)) if e.is::<ParseIntError>()));
}

fn raise_odd_payload() {
    std::panic::panic_any(404_u16);
}

#[test]
fn test_throws_reports_unknown_object() {
    fn odd() -> TestResult {
        check_throws!(raise_odd_payload(), DiskFull);
        Ok(())
    }
    assert_eq!(
        expect_failure(odd()).message(),
        "An unexpected unknown error object was raised, was expecting type DiskFull"
    );
}

#[test]
fn test_throws_matching_probes_variants() {
    fn variants() -> TestResult {
        check_throws_matching!(setting(&[], "port"), ConfigError::Missing("port"));
        check_throws_matching!(
            setting(&[("port", "eighty")], "port"),
            ConfigError::Invalid { key: "port", .. }
        );
        Ok(())
    }
    assert!(variants().is_ok());

    fn wrong_variant() -> TestResult {
        check_throws_matching!(setting(&[("port", "x")], "port"), ConfigError::Missing(_));
        Ok(())
    }
    let message = expect_failure(wrong_variant()).message().to_string();
    assert!(message.starts_with("An unexpected error was raised, was expecting ConfigError"));
    assert!(message.ends_with("Error is: Invalid { key: \"port\", value: \"x\" }"));

    fn no_error() -> TestResult {
        check_throws_matching!(setting(&[("port", "80")], "port"), ConfigError::Missing(_));
        Ok(())
    }
    assert!(expect_failure(no_error())
        .message()
        .starts_with("Failed to raise an error matching ConfigError"));
}

#[test]
fn test_throws_any_counts_panics() {
    fn indexing() -> TestResult {
        let empty: Vec<u8> = Vec::new();
        let index = empty.len();
        check_throws_any!(empty[index]);
        Ok(())
    }
    assert!(indexing().is_ok());

    fn nothing() -> TestResult {
        check_throws_any!(save(1));
        Ok(())
    }
    assert_eq!(
        expect_failure(nothing()).message(),
        "Failed to raise an error of any type"
    );
}

// ============================================================================
// NESTED FAILURES
// ============================================================================

fn inner_check() -> TestResult {
    check_eq!(1 + 1, 3);
    Ok(())
}

#[test]
fn test_nested_failure_escapes_throws_any() {
    fn outer() -> TestResult {
        check_throws_any!(inner_check());
        Ok(())
    }
    let direct = expect_failure(inner_check());
    let through = expect_failure(outer());
    assert_eq!(through, direct);
    assert!(through.function().ends_with("inner_check"));
}

#[test]
fn test_nested_failure_escapes_throws_matching() {
    fn any_error() -> TestResult {
        check_throws_matching!(inner_check(), _);
        Ok(())
    }
    fn error_variant() -> TestResult {
        check_throws_matching!(inner_check(), Fault::Error(_));
        Ok(())
    }
    let direct = expect_failure(inner_check());
    assert_eq!(expect_failure(any_error()), direct);
    assert_eq!(expect_failure(error_variant()), direct);
}

#[test]
fn test_nested_failure_escapes_throws() {
    fn outer() -> TestResult {
        check_throws!(inner_check(), DiskFull);
        Ok(())
    }
    assert_eq!(expect_failure(outer()), expect_failure(inner_check()));
}
