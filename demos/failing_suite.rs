// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A suite whose second case fails a check. Exits 1 and never runs the third.

use verdict::{check_eq, check_true, test_main, TestResult};

fn warm_up() -> TestResult {
    check_true!(!"verdict".is_empty());
    Ok(())
}

fn off_by_one() -> TestResult {
    let fence_posts = (0..10).count();
    check_eq!(fence_posts, 11, "ten sections need eleven posts");
    Ok(())
}

fn unreachable_case() {
    println!("this line is never printed");
}

test_main!("failing demo", warm_up, off_by_one, unreachable_case);
