//! Tests for suite runs: banner, fail-fast, fault reporting and exit status.

use crate::common::{run_plain, save, setting};
use std::cell::RefCell;
use std::rc::Rc;
use verdict::{check_eq, check_ge, Fault, Outcome, Phase, RunConfig, Suite, TestResult};

fn parses_port() -> TestResult {
    let port = setting(&[("port", "8080")], "port")?;
    check_ge!(port, 1024);
    Ok(())
}

fn rejects_low_port() -> TestResult {
    let port = setting(&[("port", "80")], "port")?;
    check_ge!(port, 1024);
    Ok(())
}

#[test]
fn test_passing_suite_exits_zero() {
    let (report, output) = run_plain(
        Suite::new("ports")
            .case("parses_port", parses_port)
            .case("saves", || save(10)),
    );
    assert_eq!(report.status(), 0);
    assert_eq!(report.suite(), "ports");
    assert!(matches!(report.outcome(), Outcome::Passed));
    assert_eq!(output, "Test started: ports\nTest finished\n");
}

#[test]
fn test_stops_at_first_failure() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (first, third) = (Rc::clone(&log), Rc::clone(&log));
    let (report, output) = run_plain(
        Suite::new("ports")
            .case("first", move || first.borrow_mut().push("first"))
            .case("rejects_low_port", rejects_low_port)
            .case("third", move || third.borrow_mut().push("third")),
    );

    assert_eq!(*log.borrow(), ["first"]);
    assert_eq!(report.status(), 1);
    assert_eq!(report.phase(), Phase::Failed);
    assert_eq!(report.executed(), &["first", "rejects_low_port"]);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "Test started: ports");
    assert!(lines[1].starts_with(&format!("Test has failed at file {}, line ", file!())));
    assert!(lines[1].ends_with("rejects_low_port:"));
    assert_eq!(&lines[2..], ["Comparison failed: port < 1024", "port = 80", "1024 = 1024"]);
}

#[test]
fn test_error_fault_report() {
    let (report, output) = run_plain(Suite::new("store").case("big", || save(1 << 20)));
    assert!(matches!(report.fault(), Some(Fault::Error(_))));
    assert_eq!(
        output,
        "Test started: store\nTest has failed, an error was raised: could not save snapshot\n"
    );
}

fn odd_payload() {
    std::panic::panic_any(vec![0_u8; 2]);
}

#[test]
fn test_unknown_fault_report() {
    let (report, output) = run_plain(Suite::new("odd").case("odd_payload", odd_payload));
    assert_eq!(report.status(), 1);
    assert_eq!(
        output,
        "Test started: odd\nTest has failed, an unhandled error object was raised.\n"
    );
}

#[test]
fn test_verbose_lists_cases() {
    let config = RunConfig {
        verbose: true,
        ..RunConfig::plain()
    };
    let mut out = Vec::new();
    let report = Suite::new("ports")
        .case("parses_port", parses_port)
        .case("rejects_low_port", rejects_low_port)
        .run_with(&mut out, &config)
        .expect("writing to a Vec cannot fail");
    let output = String::from_utf8(out).expect("report is utf-8");

    assert!(!report.passed());
    assert!(output.contains("[1/2] parses_port\n[2/2] rejects_low_port\n"));
    assert!(!output.contains("Test finished"));
}

#[test]
fn test_suite_accessors() {
    let suite = Suite::new("shape")
        .case("a", || ())
        .case("b", || -> TestResult {
            check_eq!(1, 1);
            Ok(())
        });
    assert_eq!(suite.name(), "shape");
    assert_eq!(suite.len(), 2);
    assert!(!suite.is_empty());
}
