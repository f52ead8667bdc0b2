// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Procedural macros for verdict test programs.
//!
//! A test program is a block of test code plus a `main` that runs it, reports
//! the first fault and exits 0 or 1. `#[verdict::main]` writes that `main` for
//! you: annotate the function holding the test code and it becomes the body of
//! a single-case [`Suite`](../verdict/struct.Suite.html).
//!
//! # Example
//!
//! ```ignore
//! use verdict::{check_eq, TestResult};
//!
//! fn push_grows() -> TestResult {
//!     let mut v = vec![1];
//!     v.push(2);
//!     check_eq!(v.len(), 2);
//!     Ok(())
//! }
//!
//! #[verdict::main("vector")]
//! fn main() -> TestResult {
//!     push_grows()?;
//!     Ok(())
//! }
//! ```

use proc_macro::TokenStream;

mod main_attr;

/// Attribute macro turning a function of test code into the program's `main`.
///
/// # Attributes
///
/// - `"Suite name"` or `name = "Suite name"` - Banner name (defaults to the
///   crate name)
/// - `crate = "path"` - Path to the verdict crate when the dependency is
///   renamed (defaults to `::verdict`)
///
/// # Generated Output
///
/// A `fn main() -> std::process::ExitCode` that nests the annotated function
/// and runs it as the only case of a `verdict::Suite`. The annotated function
/// takes no arguments and returns `()`, `verdict::TestResult`, or any `Result`
/// whose error converts into `verdict::Fault`.
#[proc_macro_attribute]
pub fn main(attr: TokenStream, item: TokenStream) -> TokenStream {
    match main_attr::expand(attr.into(), item.into()) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
