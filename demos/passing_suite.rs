// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A suite where every case passes. Exits 0.
//!
//! ```sh
//! cargo run --example passing_suite -- --verbose
//! ```

use std::collections::BTreeMap;
use std::num::ParseIntError;

use verdict::{
    check_eq, check_false, check_ge, check_le, check_ne, check_throws, check_throws_any,
    check_true, test_main, TestResult,
};

fn arithmetic() -> TestResult {
    check_eq!(6 * 7, 42);
    check_ne!(6 * 7, 41);
    check_ge!(u8::MAX, 255);
    check_le!(i32::MIN, 0);
    Ok(())
}

fn collections() -> TestResult {
    let mut scores = BTreeMap::new();
    scores.insert("ada", 36);
    scores.insert("grace", 85);

    check_eq!(scores.len(), 2, "two distinct keys");
    check_true!(scores.contains_key("ada"));
    check_false!(scores.contains_key("alan"));
    check_eq!(scores.keys().copied().collect::<Vec<_>>(), ["ada", "grace"]);
    Ok(())
}

fn parsing() -> TestResult {
    check_eq!("1024".parse::<u32>()?, 1024);
    check_throws!("ten".parse::<u32>(), ParseIntError);
    check_throws_any!("".parse::<u32>());
    Ok(())
}

test_main!("passing demo", arithmetic, collections, parsing);
