// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fail-fast assertion checks and a test-program entry point.
//!
//! Checks (`check_eq!`, `check_throws!`, ...) return a located [`Failure`]
//! from the enclosing function when they do not hold. A [`Suite`] runs test
//! cases in order, reports the first fault on stdout and turns the run into a
//! process exit status: 0 when everything passed, 1 otherwise.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  failure.rs  │────▶│   fault.rs   │────▶│   suite.rs   │
//! │ (Failure,    │     │ (Fault,      │     │ (Suite,      │
//! │  Site)       │     │  Attempt)    │     │  Report)     │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!        ▲                    ▲                    │
//!        │                    │                    ▼
//! ┌─────────────────────────────────┐     ┌──────────────────┐
//! │            checks.rs            │     │ config.rs        │
//! │ (check_eq!, check_throws!, ...) │     │ display.rs       │
//! └─────────────────────────────────┘     └──────────────────┘
//! ```
//!
//! # Failures are not errors
//!
//! [`Failure`] does not implement `std::error::Error`. Generic error handling
//! in test code (`Box<dyn Error>`, `anyhow`, a `check_throws_any!`) cannot
//! absorb one by accident; only the runner and code naming the type see it.
//!
//! # Usage
//!
//! ```no_run
//! use verdict::{check_eq, check_throws_any, test_main, TestResult};
//!
//! fn parses_numbers() -> TestResult {
//!     check_eq!("42".parse::<u32>()?, 42);
//!     Ok(())
//! }
//!
//! fn rejects_garbage() -> TestResult {
//!     check_throws_any!("forty-two".parse::<u32>());
//!     Ok(())
//! }
//!
//! test_main!("parsing", parses_numbers, rejects_garbage);
//! ```

mod checks;
mod config;
mod display;
mod failure;
mod fault;
mod suite;

pub use checks::is_kind;
pub use config::{ColorChoice, RunConfig};
pub use display::{Style, Theme};
pub use failure::{Failure, Site};
pub use fault::{attempt, Attempt, Fault, Panicked, TestResult};
pub use suite::{Outcome, Phase, Report, Suite};

/// Turn a function holding test code into the program's `main`.
///
/// See [`verdict_macros::main`].
#[cfg(feature = "macros")]
pub use verdict_macros::main;

/// Support items for the macro expansions. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use crate::checks::{
        catch, comparison_message, equality_message, expect_any, expect_kind, inequality_message,
        mismatched, not_raised, unexpected, Nested, NestedFailure, NotNested,
    };
    pub use crate::failure::{enclosing_function, type_name_of};
    pub use crate::fault::{AttemptValue, DiscardValue, Evaluated};
}
