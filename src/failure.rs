// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The record a check produces when it does not hold.
//!
//! A [`Failure`] is self-locating: the file, line and enclosing function are
//! baked in at the call site by the `check_*!` macros, and the message already
//! contains the operand source text plus the runtime values. Reading the record
//! is enough to diagnose the failure without re-running anything.
//!
//! # Invisible to generic handlers
//!
//! `Failure` does not implement [`std::error::Error`]. Test code that funnels
//! errors into `Box<dyn Error>` or `anyhow::Error` with `?` cannot absorb a
//! failure by accident: the conversion does not exist. The only way to get at
//! one is to name the type, which is what the runner and the `check_throws*!`
//! macros do.

use std::fmt;

/// Where a check was written: file, line and enclosing function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Site {
    file: &'static str,
    line: u32,
    function: &'static str,
}

impl Site {
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Site {
            file,
            line,
            function,
        }
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn function(&self) -> &'static str {
        self.function
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.file, self.line, self.function)
    }
}

/// One failed check. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Failure {
    #[cfg_attr(feature = "serde", serde(flatten))]
    site: Site,
    message: String,
}

impl Failure {
    /// Build a failure for `site`.
    ///
    /// # Panics (debug builds only)
    /// Panics if the site has an empty file name or a zero line number; both
    /// come from `file!()`/`line!()` when built through the macros.
    pub fn new(site: Site, message: impl Into<String>) -> Self {
        debug_assert!(!site.file.is_empty(), "failure site without a file name");
        debug_assert!(site.line >= 1, "failure site line numbers start at 1");

        Failure {
            site,
            message: message.into(),
        }
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn file(&self) -> &'static str {
        self.site.file
    }

    pub fn line(&self) -> u32 {
        self.site.line
    }

    pub fn function(&self) -> &'static str {
        self.site.function
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "check failed at {}: {}", self.site, self.message)
    }
}

/// Capture the [`Site`] of the macro invocation.
///
/// The function name comes from the type name of a nested fn item, which is
/// the path of the function the macro was expanded in.
#[doc(hidden)]
#[macro_export]
macro_rules! __site {
    () => {
        $crate::Site::new(::core::file!(), ::core::line!(), {
            fn __verdict_site() {}
            $crate::__private::enclosing_function($crate::__private::type_name_of(
                __verdict_site,
            ))
        })
    };
}

#[doc(hidden)]
pub fn type_name_of<T>(_: T) -> &'static str {
    std::any::type_name::<T>()
}

/// Strip the probe item and any closure frames from a `type_name` path.
#[doc(hidden)]
pub fn enclosing_function(raw: &'static str) -> &'static str {
    let mut name = raw.strip_suffix("::__verdict_site").unwrap_or(raw);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}
