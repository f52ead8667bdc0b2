// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The test-program entry point.
//!
//! A [`Suite`] is a name plus an ordered list of test cases. Running it prints
//! a banner, runs the cases in order and stops at the first fault:
//!
//! ```text
//! Started ──▶ Running ──┬──▶ Passed   (every case returned Ok, exit 0)
//!                       └──▶ Failed   (first fault reported, exit 1)
//! ```
//!
//! Later cases never run after a fault; cases are expected to be ordered so
//! that earlier ones are prerequisites of, or independent from, later ones.
//! The exit status is the only machine-readable output of a run.

use std::io::{self, Write};
use std::process::ExitCode;

use crate::config::RunConfig;
use crate::display::Style;
use crate::fault::{attempt_loudly, Attempt, Fault, TestResult};

/// Where a run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Started,
    Running,
    Passed,
    Failed,
}

impl Phase {
    fn advance(self, next: Phase) -> Phase {
        debug_assert!(
            matches!(
                (self, next),
                (Phase::Started, Phase::Running)
                    | (Phase::Running, Phase::Passed)
                    | (Phase::Running, Phase::Failed)
            ),
            "invalid run transition {:?} -> {:?}",
            self,
            next
        );
        next
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Passed | Phase::Failed)
    }
}

struct Case {
    name: &'static str,
    body: Box<dyn FnOnce() -> TestResult>,
}

/// A named, ordered sequence of test cases.
pub struct Suite {
    name: String,
    cases: Vec<Case>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Suite {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Append a test case.
    ///
    /// The body can return `()`, a [`TestResult`], or any `Result` whose error
    /// converts into a [`Fault`]. Panics are caught and reported as faults.
    pub fn case<F, R>(mut self, name: &'static str, body: F) -> Self
    where
        F: FnOnce() -> R + 'static,
        R: Attempt,
    {
        self.cases.push(Case {
            name,
            body: Box::new(move || attempt_loudly(body)),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Run against stdout with flags from the command line.
    ///
    /// Returns exit status 0 when every case passed and 1 otherwise,
    /// including when the report could not be written.
    pub fn run(self) -> ExitCode {
        let config = RunConfig::from_args();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        match self.run_with(&mut out, &config) {
            Ok(report) => report.exit_code(),
            Err(_) => ExitCode::FAILURE,
        }
    }

    /// Run, writing the report to `out`.
    pub fn run_with<W: Write>(self, out: &mut W, config: &RunConfig) -> io::Result<Report> {
        let style = config.style();
        let total = self.cases.len();
        let mut phase = Phase::Started;

        writeln!(out, "Test started: {}", self.name)?;
        out.flush()?;
        phase = phase.advance(Phase::Running);

        let mut executed = Vec::with_capacity(total);
        let mut fault = None;
        for (i, case) in self.cases.into_iter().enumerate() {
            if config.verbose {
                writeln!(
                    out,
                    "{}",
                    style.progress(&format!("[{}/{}] {}", i + 1, total, case.name))
                )?;
                out.flush()?;
            }
            executed.push(case.name);
            if let Err(raised) = (case.body)() {
                fault = Some(raised);
                break;
            }
        }

        let outcome = match fault {
            Some(fault) => {
                write_fault(out, &style, &fault)?;
                phase = phase.advance(Phase::Failed);
                Outcome::Failed(fault)
            }
            None => {
                let line = if config.verbose {
                    format!("Test finished ({} test cases)", total)
                } else {
                    "Test finished".to_string()
                };
                writeln!(out, "{}", style.success(&line))?;
                phase = phase.advance(Phase::Passed);
                Outcome::Passed
            }
        };
        out.flush()?;

        Ok(Report {
            suite: self.name,
            executed,
            phase,
            outcome,
        })
    }
}

fn write_fault<W: Write>(out: &mut W, style: &Style, fault: &Fault) -> io::Result<()> {
    match fault {
        Fault::Failure(failure) => {
            let header = format!(
                "Test has failed at file {}, line {}, function {}:",
                failure.file(),
                failure.line(),
                failure.function()
            );
            writeln!(out, "{}", style.failure(&header))?;
            writeln!(out, "{}", failure.message())
        }
        Fault::Error(error) => writeln!(
            out,
            "{}",
            style.failure(&format!("Test has failed, an error was raised: {}", error))
        ),
        Fault::Unknown(_) => writeln!(
            out,
            "{}",
            style.failure("Test has failed, an unhandled error object was raised.")
        ),
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    Passed,
    Failed(Fault),
}

/// The result of [`Suite::run_with`].
#[derive(Debug)]
pub struct Report {
    suite: String,
    executed: Vec<&'static str>,
    phase: Phase,
    outcome: Outcome,
}

impl Report {
    pub fn suite(&self) -> &str {
        &self.suite
    }

    /// Names of the cases that started, in order. The last one is the one
    /// that faulted when the run failed.
    pub fn executed(&self) -> &[&'static str] {
        &self.executed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Passed)
    }

    pub fn fault(&self) -> Option<&Fault> {
        match &self.outcome {
            Outcome::Failed(fault) => Some(fault),
            Outcome::Passed => None,
        }
    }

    /// 0 when every case passed, 1 otherwise.
    pub fn status(&self) -> u8 {
        if self.passed() {
            0
        } else {
            1
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }
}

/// Declare `fn main()` running the listed test cases as one suite.
///
/// ```no_run
/// use verdict::{check_eq, test_main, TestResult};
///
/// fn addition() -> TestResult {
///     check_eq!(1 + 1, 2);
///     Ok(())
/// }
///
/// fn subtraction() -> TestResult {
///     check_eq!(3 - 1, 2);
///     Ok(())
/// }
///
/// test_main!("arithmetic", addition, subtraction);
/// ```
#[macro_export]
macro_rules! test_main {
    ($name:expr, $($case:path),+ $(,)?) => {
        fn main() -> ::std::process::ExitCode {
            $crate::Suite::new($name)
                $(.case(::core::stringify!($case), $case))+
                .run()
        }
    };
}
