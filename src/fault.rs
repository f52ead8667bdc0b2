// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! What can come out of a test case besides success.
//!
//! Three shapes, reported differently by the runner:
//!
//! | Variant            | Source                                          |
//! |--------------------|-------------------------------------------------|
//! | `Fault::Failure`   | a `check_*!` macro that did not hold            |
//! | `Fault::Error`     | any `std::error::Error`, or a panic with a message |
//! | `Fault::Unknown`   | a panic whose payload carries no message        |
//!
//! `Fault` converts from [`Failure`] and from every `E: Error`, so test cases
//! returning [`TestResult`] can use `?` on both. It does not implement `Error`
//! itself, which keeps failures out of `Box<dyn Error>` in both directions.

use std::any::Any;
use std::cell::Cell;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::thread;

use crate::failure::Failure;

/// Result type for test cases.
pub type TestResult = Result<(), Fault>;

/// Anything that surfaced out of a test case.
#[derive(Debug)]
pub enum Fault {
    /// A check failed.
    Failure(Failure),
    /// A recognized error with a message.
    Error(Box<dyn Error + 'static>),
    /// An object with no inspectable message (usually a panic payload).
    Unknown(Box<dyn Any + Send + 'static>),
}

impl Fault {
    /// Classify a panic payload caught by `catch_unwind`.
    ///
    /// A `Failure` raised with `panic_any` stays a failure, string payloads
    /// (`panic!("...")`) become [`Panicked`] errors, anything else is unknown.
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let payload = match payload.downcast::<Failure>() {
            Ok(failure) => return Fault::Failure(*failure),
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<String>() {
            Ok(message) => return Fault::Error(Box::new(Panicked(*message))),
            Err(payload) => payload,
        };
        match payload.downcast::<&'static str>() {
            Ok(message) => Fault::Error(Box::new(Panicked((*message).to_string()))),
            Err(payload) => Fault::Unknown(payload),
        }
    }

    /// Wrap an already boxed error.
    ///
    /// `Box<dyn Error>` is not itself an `Error`, so `?` cannot convert it;
    /// use `.map_err(Fault::from_boxed)?` instead.
    pub fn from_boxed(error: Box<dyn Error + 'static>) -> Self {
        Fault::Error(error)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Fault::Failure(_))
    }

    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            Fault::Failure(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<Failure> for Fault {
    fn from(failure: Failure) -> Self {
        Fault::Failure(failure)
    }
}

impl<E: Error + 'static> From<E> for Fault {
    fn from(error: E) -> Self {
        Fault::Error(Box::new(error))
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Failure(failure) => write!(f, "{}", failure),
            Fault::Error(error) => write!(f, "{}", error),
            Fault::Unknown(_) => write!(f, "unknown error object"),
        }
    }
}

/// A panic that carried a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panicked(pub String);

impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panicked: {}", self.0)
    }
}

impl Error for Panicked {}

/// Values a statement under test can produce.
///
/// `()` never raises. A `Result` raises its `Err`, converted into a [`Fault`].
pub trait Attempt {
    fn into_test_result(self) -> TestResult;
}

impl Attempt for () {
    fn into_test_result(self) -> TestResult {
        Ok(())
    }
}

impl<T, E: Into<Fault>> Attempt for Result<T, E> {
    fn into_test_result(self) -> TestResult {
        self.map(drop).map_err(Into::into)
    }
}

/// Run `stmt`, catching panics, and report what it raised.
///
/// Panics raised by `stmt` are part of the result, so the panic hook stays
/// silent for them.
pub fn attempt<F, R>(stmt: F) -> TestResult
where
    F: FnOnce() -> R,
    R: Attempt,
{
    match catch_quietly(stmt) {
        Ok(value) => value.into_test_result(),
        Err(payload) => Err(Fault::from_panic(payload)),
    }
}

/// Like [`attempt`], but the panic hook still reports panics on stderr.
pub(crate) fn attempt_loudly<F, R>(stmt: F) -> TestResult
where
    F: FnOnce() -> R,
    R: Attempt,
{
    match panic::catch_unwind(AssertUnwindSafe(stmt)) {
        Ok(value) => value.into_test_result(),
        Err(payload) => Err(Fault::from_panic(payload)),
    }
}

// ============================================================================
// QUIET PANICS
// ============================================================================

thread_local! {
    /// Depth of `catch_quietly` calls active on this thread.
    static QUIET_DEPTH: Cell<u32> = const { Cell::new(0) };
}

static QUIET_HOOK: Once = Once::new();

/// Chain a hook in front of the current one that drops reports for panics
/// raised under `catch_quietly` on the same thread. Installed once per process.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let quiet = QUIET_DEPTH.try_with(|depth| depth.get() > 0).unwrap_or(false);
            if !quiet {
                previous(info);
            }
        }));
    });
}

struct QuietGuard;

impl QuietGuard {
    fn enter() -> Self {
        install_quiet_hook();
        QUIET_DEPTH.with(|depth| depth.set(depth.get() + 1));
        QuietGuard
    }
}

impl Drop for QuietGuard {
    fn drop(&mut self) {
        let _ = QUIET_DEPTH.try_with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// `catch_unwind` without a panic report on stderr.
pub(crate) fn catch_quietly<F, T>(stmt: F) -> thread::Result<T>
where
    F: FnOnce() -> T,
{
    let _guard = QuietGuard::enter();
    panic::catch_unwind(AssertUnwindSafe(stmt))
}

// ============================================================================
// STATEMENT VALUES
// ============================================================================

/// The value of a statement under test, waiting to be classified.
///
/// Method resolution picks the most specific `into_test_result` (see
/// `__evaluate!`): boxed errors first, then any [`Attempt`], then any other
/// value, which is discarded.
#[doc(hidden)]
pub struct Evaluated<R>(pub Option<R>);

impl<T> Evaluated<Result<T, Box<dyn Error + 'static>>> {
    pub fn into_test_result(&mut self) -> TestResult {
        match self.0.take() {
            Some(Err(error)) => Err(Fault::Error(error)),
            _ => Ok(()),
        }
    }
}

impl<T> Evaluated<Result<T, Box<dyn Error + Send + Sync + 'static>>> {
    pub fn into_test_result(&mut self) -> TestResult {
        match self.0.take() {
            Some(Err(error)) => Err(Fault::Error(error)),
            _ => Ok(()),
        }
    }
}

#[doc(hidden)]
pub trait AttemptValue {
    fn into_test_result(&mut self) -> TestResult;
}

impl<R: Attempt> AttemptValue for Evaluated<R> {
    fn into_test_result(&mut self) -> TestResult {
        self.0.take().map_or(Ok(()), Attempt::into_test_result)
    }
}

#[doc(hidden)]
pub trait DiscardValue {
    fn into_test_result(&mut self) -> TestResult;
}

impl<R> DiscardValue for &mut Evaluated<R> {
    fn into_test_result(&mut self) -> TestResult {
        drop(self.0.take());
        Ok(())
    }
}

/// Evaluate a statement into a [`TestResult`], whatever its type.
#[doc(hidden)]
#[macro_export]
macro_rules! __evaluate {
    ($stmt:expr) => {{
        #[allow(unused_imports)]
        use $crate::__private::{AttemptValue as _, DiscardValue as _};
        let mut evaluated = $crate::__private::Evaluated(::core::option::Option::Some($stmt));
        (&mut evaluated).into_test_result()
    }};
}
