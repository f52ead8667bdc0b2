//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::error::Error;
use std::fmt;

use verdict::{Failure, Fault, Report, RunConfig, Suite, TestResult};

// ============================================================================
// SUITE HELPERS
// ============================================================================

/// Run a suite without colors, returning the report and everything it printed.
pub fn run_plain(suite: Suite) -> (Report, String) {
    let mut out = Vec::new();
    let report = suite
        .run_with(&mut out, &RunConfig::plain())
        .expect("writing to a Vec cannot fail");
    let output = String::from_utf8(out).expect("report is utf-8");
    (report, output)
}

/// The failure a piece of test code returned.
///
/// Panics when the code passed or raised anything other than a failure.
pub fn expect_failure(result: TestResult) -> Failure {
    match result {
        Err(Fault::Failure(failure)) => failure,
        Err(other) => panic!("expected a check failure, got: {}", other),
        Ok(()) => panic!("expected a check failure, but the test code passed"),
    }
}

// ============================================================================
// ERROR FIXTURES
// ============================================================================

/// Leaf error with no source.
#[derive(Debug)]
pub struct DiskFull;

impl fmt::Display for DiskFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "disk full")
    }
}

impl Error for DiskFull {}

/// Wraps a [`DiskFull`] as its source.
#[derive(Debug)]
pub struct SaveFailed {
    pub cause: DiskFull,
}

impl fmt::Display for SaveFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not save snapshot")
    }
}

impl Error for SaveFailed {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

/// Error enum probed by variant.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing key {}", key),
            ConfigError::Invalid { key, value } => write!(f, "invalid value {:?} for {}", value, key),
        }
    }
}

impl Error for ConfigError {}

/// Save `bytes` into a 1 KiB store.
pub fn save(bytes: usize) -> Result<usize, SaveFailed> {
    if bytes > 1024 {
        return Err(SaveFailed { cause: DiskFull });
    }
    Ok(bytes)
}

/// Look up a numeric setting from `key=value` pairs.
pub fn setting(pairs: &[(&'static str, &str)], key: &'static str) -> Result<u32, ConfigError> {
    let (_, raw) = pairs
        .iter()
        .find(|(k, _)| *k == key)
        .ok_or(ConfigError::Missing(key))?;
    raw.parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}
