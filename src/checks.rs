// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The `check_*!` macros.
//!
//! Every check evaluates its operands exactly once, and on failure returns
//! `Err(From::from(failure))` from the enclosing function. Anything whose
//! error type implements `From<Failure>` can host a check; in practice that
//! is [`TestResult`](crate::TestResult) or `Result<_, Failure>`.
//!
//! | Macro                      | Holds when                               |
//! |----------------------------|------------------------------------------|
//! | `check_eq!(a, b[, ctx])`   | `a == b`                                 |
//! | `check_ne!(a, b)`          | `a != b`                                 |
//! | `check_true!(x)`           | `x == true`                              |
//! | `check_false!(x)`          | `x == false`                             |
//! | `check_ge!(s, v)`          | `s >= v`                                 |
//! | `check_le!(s, v)`          | `s <= v`                                 |
//! | `check_throws!(s, Kind)`   | `s` raises a `Kind` (or wraps one)       |
//! | `check_throws_matching!(s, Pat)` | `s` is `Err(e)` with `e` matching `Pat` |
//! | `check_throws_any!(s)`     | `s` raises anything but a `Failure`      |
//! | `check_fail!(msg)`         | never                                    |
//!
//! # INVARIANT: nested failures propagate
//!
//! The `check_throws*!` family intercepts errors to inspect them. A
//! [`Failure`] coming out of the statement, as an `Err` value or a panic
//! payload, is never the expected error: it is returned unchanged, so a check
//! that failed inside the statement still fails the test with its own
//! location and message.
//!
//! Panics caught here are expected outcomes and are not reported by the
//! panic hook.

use std::error::Error;
use std::fmt::{Debug, Display};

use crate::failure::{Failure, Site};
use crate::fault::{attempt, catch_quietly, Attempt, Fault};

// ============================================================================
// VALUE CHECKS
// ============================================================================

/// Check that two values are equal, with an optional context message.
///
/// ```
/// use verdict::{check_eq, TestResult};
///
/// fn sums() -> TestResult {
///     check_eq!(2 + 2, 4);
///     check_eq!("ab".len(), 2, "ascii strings are one byte per char");
///     Ok(())
/// }
/// # sums().unwrap();
/// ```
#[macro_export]
macro_rules! check_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    let message = $crate::__private::equality_message(
                        ::core::stringify!($left),
                        ::core::stringify!($right),
                        left,
                        right,
                        ::core::option::Option::None,
                    );
                    return ::core::result::Result::Err(::core::convert::From::from(
                        $crate::Failure::new($crate::__site!(), message),
                    ));
                }
            }
        }
    };
    ($left:expr, $right:expr, $context:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    let message = $crate::__private::equality_message(
                        ::core::stringify!($left),
                        ::core::stringify!($right),
                        left,
                        right,
                        ::core::option::Option::Some(&$context as &dyn ::core::fmt::Display),
                    );
                    return ::core::result::Result::Err(::core::convert::From::from(
                        $crate::Failure::new($crate::__site!(), message),
                    ));
                }
            }
        }
    };
}

/// Check that two values differ.
#[macro_export]
macro_rules! check_ne {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if *left == *right {
                    let message = $crate::__private::inequality_message(
                        ::core::stringify!($left),
                        ::core::stringify!($right),
                        left,
                    );
                    return ::core::result::Result::Err(::core::convert::From::from(
                        $crate::Failure::new($crate::__site!(), message),
                    ));
                }
            }
        }
    };
}

/// Check that a boolean expression is `true`.
#[macro_export]
macro_rules! check_true {
    ($cond:expr $(,)?) => {
        $crate::check_eq!($cond, true)
    };
}

/// Check that a boolean expression is `false`.
#[macro_export]
macro_rules! check_false {
    ($cond:expr $(,)?) => {
        $crate::check_eq!($cond, false)
    };
}

/// Check that `stmt >= bound`.
#[macro_export]
macro_rules! check_ge {
    ($stmt:expr, $bound:expr $(,)?) => {
        match (&$stmt, &$bound) {
            (stmt, bound) => {
                if *stmt < *bound {
                    let message = $crate::__private::comparison_message(
                        ::core::stringify!($stmt),
                        "<",
                        ::core::stringify!($bound),
                        stmt,
                        bound,
                    );
                    return ::core::result::Result::Err(::core::convert::From::from(
                        $crate::Failure::new($crate::__site!(), message),
                    ));
                }
            }
        }
    };
}

/// Check that `stmt <= bound`.
#[macro_export]
macro_rules! check_le {
    ($stmt:expr, $bound:expr $(,)?) => {
        match (&$stmt, &$bound) {
            (stmt, bound) => {
                if *stmt > *bound {
                    let message = $crate::__private::comparison_message(
                        ::core::stringify!($stmt),
                        ">",
                        ::core::stringify!($bound),
                        stmt,
                        bound,
                    );
                    return ::core::result::Result::Err(::core::convert::From::from(
                        $crate::Failure::new($crate::__site!(), message),
                    ));
                }
            }
        }
    };
}

/// Fail unconditionally.
///
/// A single argument is used verbatim; more arguments go through `format!`.
#[macro_export]
macro_rules! check_fail {
    ($message:expr $(,)?) => {
        return ::core::result::Result::Err(::core::convert::From::from($crate::Failure::new(
            $crate::__site!(),
            $message,
        )))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return ::core::result::Result::Err(::core::convert::From::from($crate::Failure::new(
            $crate::__site!(),
            ::std::format!($fmt, $($arg)+),
        )))
    };
}

// ============================================================================
// ERROR EXPECTATIONS
// ============================================================================

/// Check that evaluating `stmt` raises an error of type `Kind`.
///
/// The statement raises when it panics or evaluates to `Err`. An error whose
/// `source()` chain contains a `Kind` also counts. Panics with a message are
/// raised as [`Panicked`](crate::Panicked).
///
/// The statement can have any type. Values other than a `Result` are
/// discarded, and `Result<_, Box<dyn Error>>` is inspected like any other
/// result. A statement that always diverges (`panic_any(..)`) needs a
/// concrete type, e.g. a helper `fn` returning `()`.
///
/// ```
/// use verdict::{check_throws, TestResult};
/// use std::num::ParseIntError;
///
/// fn parse_rejects_words() -> TestResult {
///     check_throws!("seven".parse::<i32>(), ParseIntError);
///     Ok(())
/// }
/// # parse_rejects_words().unwrap();
/// ```
#[macro_export]
macro_rules! check_throws {
    ($stmt:expr, $kind:ty $(,)?) => {
        if let ::core::result::Result::Err(failure) = $crate::__private::expect_kind::<$kind, _, _>(
            $crate::__site!(),
            ::core::stringify!($kind),
            || $crate::__evaluate!($stmt),
        ) {
            return ::core::result::Result::Err(::core::convert::From::from(failure));
        }
    };
}

/// Check that `stmt` evaluates to `Err(e)` with `e` matching a pattern.
///
/// Meant for error enums, where the variant is the kind being probed. When
/// `stmt` returns a [`TestResult`](crate::TestResult) or `Result<_, Failure>`
/// and its error is a failure, that failure is returned unchanged instead of
/// being matched.
#[macro_export]
macro_rules! check_throws_matching {
    ($stmt:expr, $pattern:pat $(,)?) => {
        match $crate::__private::catch(|| $stmt) {
            ::core::result::Result::Ok(::core::result::Result::Ok(_)) => {
                return ::core::result::Result::Err(::core::convert::From::from(
                    $crate::__private::not_raised(
                        $crate::__site!(),
                        &::std::format!("matching {}", ::core::stringify!($pattern)),
                    ),
                ));
            }
            ::core::result::Result::Ok(::core::result::Result::Err(raised)) => {
                #[allow(unused_imports)]
                use $crate::__private::{NestedFailure as _, NotNested as _};
                if let ::core::option::Option::Some(failure) =
                    (&$crate::__private::Nested(&raised)).nested_failure()
                {
                    return ::core::result::Result::Err(::core::convert::From::from(failure));
                }
                match raised {
                    $pattern => {}
                    #[allow(unreachable_patterns)]
                    other => {
                        return ::core::result::Result::Err(::core::convert::From::from(
                            $crate::__private::mismatched(
                                $crate::__site!(),
                                ::core::stringify!($pattern),
                                &other,
                            ),
                        ));
                    }
                }
            }
            ::core::result::Result::Err(fault) => {
                return ::core::result::Result::Err(::core::convert::From::from(
                    $crate::__private::unexpected(
                        $crate::__site!(),
                        ::core::stringify!($pattern),
                        fault,
                    ),
                ));
            }
        }
    };
}

/// Check that evaluating `stmt` raises any error.
///
/// A [`Failure`](crate::Failure) coming out of `stmt` does not satisfy the
/// check: it is returned unchanged from the enclosing function.
#[macro_export]
macro_rules! check_throws_any {
    ($stmt:expr $(,)?) => {
        if let ::core::result::Result::Err(failure) =
            $crate::__private::expect_any($crate::__site!(), || $crate::__evaluate!($stmt))
        {
            return ::core::result::Result::Err(::core::convert::From::from(failure));
        }
    };
}

// ============================================================================
// MESSAGE BUILDERS (used by the macro expansions)
// ============================================================================

#[doc(hidden)]
pub fn equality_message(
    left_src: &str,
    right_src: &str,
    left: &dyn Debug,
    right: &dyn Debug,
    context: Option<&dyn Display>,
) -> String {
    let context = context.map(|c| format!(" ({})", c)).unwrap_or_default();
    format!(
        "Equality test failed: {} != {}{}\n{} = {:?}\n{} = {:?}",
        left_src, right_src, context, left_src, left, right_src, right
    )
}

#[doc(hidden)]
pub fn inequality_message(left_src: &str, right_src: &str, shared: &dyn Debug) -> String {
    format!(
        "Inequality test failed: {} == {} (== {:?})",
        left_src, right_src, shared
    )
}

/// `op` is the relation that actually held, e.g. `<` for a failed `>=`.
#[doc(hidden)]
pub fn comparison_message(
    stmt_src: &str,
    op: &str,
    bound_src: &str,
    stmt: &dyn Debug,
    bound: &dyn Debug,
) -> String {
    format!(
        "Comparison failed: {} {} {}\n{} = {:?}\n{} = {:?}",
        stmt_src, op, bound_src, stmt_src, stmt, bound_src, bound
    )
}

// ============================================================================
// ERROR EXPECTATION HELPERS
// ============================================================================

/// Whether `error`, or any error in its `source()` chain, is a `K`.
pub fn is_kind<K: Error + 'static>(error: &(dyn Error + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(err) = current {
        if err.is::<K>() {
            return true;
        }
        current = err.source();
    }
    false
}

/// Run `stmt`, turning a panic into a [`Fault`] and leaving its value alone.
#[doc(hidden)]
pub fn catch<F, T>(stmt: F) -> Result<T, Fault>
where
    F: FnOnce() -> T,
{
    catch_quietly(stmt).map_err(Fault::from_panic)
}

/// Borrowed error value of a statement under `check_throws_matching!`.
///
/// `(&Nested(&error)).nested_failure()` finds a failure inside a [`Fault`]
/// or a bare [`Failure`]; for every other error type it resolves to
/// [`NotNested`] and finds nothing.
#[doc(hidden)]
pub struct Nested<'a, E>(pub &'a E);

#[doc(hidden)]
pub trait NestedFailure {
    fn nested_failure(&self) -> Option<Failure>;
}

impl NestedFailure for Nested<'_, Fault> {
    fn nested_failure(&self) -> Option<Failure> {
        self.0.as_failure().cloned()
    }
}

impl NestedFailure for Nested<'_, Failure> {
    fn nested_failure(&self) -> Option<Failure> {
        Some(self.0.clone())
    }
}

#[doc(hidden)]
pub trait NotNested {
    fn nested_failure(&self) -> Option<Failure>;
}

impl<E> NotNested for &Nested<'_, E> {
    fn nested_failure(&self) -> Option<Failure> {
        None
    }
}

#[doc(hidden)]
pub fn not_raised(site: Site, what: &str) -> Failure {
    Failure::new(site, format!("Failed to raise an error {}", what))
}

#[doc(hidden)]
pub fn mismatched(site: Site, expected: &str, error: &dyn Debug) -> Failure {
    Failure::new(
        site,
        format!(
            "An unexpected error was raised, was expecting {}. Error is: {:?}",
            expected, error
        ),
    )
}

/// Classify a fault that is not the expected one. Failures pass through.
#[doc(hidden)]
pub fn unexpected(site: Site, expected: &str, fault: Fault) -> Failure {
    match fault {
        Fault::Failure(failure) => failure,
        Fault::Error(error) => Failure::new(
            site,
            format!(
                "An unexpected error was raised, was expecting {}. Error message is: {}",
                expected, error
            ),
        ),
        Fault::Unknown(_) => Failure::new(
            site,
            format!(
                "An unexpected unknown error object was raised, was expecting {}",
                expected
            ),
        ),
    }
}

#[doc(hidden)]
pub fn expect_kind<K, F, R>(site: Site, kind: &str, stmt: F) -> Result<(), Failure>
where
    K: Error + 'static,
    F: FnOnce() -> R,
    R: Attempt,
{
    let expected = format!("type {}", kind);
    match attempt(stmt) {
        Ok(()) => Err(not_raised(site, &format!("of {}", expected))),
        Err(Fault::Error(error)) if is_kind::<K>(&*error) => Ok(()),
        Err(fault) => Err(unexpected(site, &expected, fault)),
    }
}

#[doc(hidden)]
pub fn expect_any<F, R>(site: Site, stmt: F) -> Result<(), Failure>
where
    F: FnOnce() -> R,
    R: Attempt,
{
    match attempt(stmt) {
        Ok(()) => Err(not_raised(site, "of any type")),
        // INVARIANT: a nested failure is the test failing, not the expected error.
        Err(Fault::Failure(failure)) => Err(failure),
        Err(Fault::Error(_) | Fault::Unknown(_)) => Ok(()),
    }
}
