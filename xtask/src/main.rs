//! Custom cargo commands for verdict.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask contract  - Check demo suite exit statuses
//!   cargo xtask check     - Quick check (no demos)

use anyhow::{bail, Context, Result};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Demo suites and the exit status each must end with.
const DEMOS: &[(&str, i32)] = &[
    ("passing_suite", 0),
    ("failing_suite", 1),
    ("block_suite", 0),
];

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("contract") => contract()?,
        Some("check") => check()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (tests + clippy + demo contract)
  test      Run all Rust tests
  contract  Build the demo suites and check their exit statuses
  check     Quick check (cargo test + clippy, no demos)
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("Verdict Verification Suite");
    println!("==========================================\n");

    println!("[1/3] Running Rust tests...");
    run_cargo(&["test", "--quiet", "--workspace"])?;
    println!("✓ All Rust tests passed\n");

    println!("[2/3] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--workspace", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[3/3] Checking demo exit statuses...");
    contract()?;
    println!("✓ Demo suites exit as expected\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test", "--workspace"])
}

/// Build every demo suite, run it, and compare its exit status.
fn contract() -> Result<()> {
    run_cargo(&["build", "--quiet", "--examples"])?;

    let examples = examples_dir(&project_root()?, env::var_os("CARGO_TARGET_DIR"));
    for (name, expected) in DEMOS {
        let binary = examples.join(format!("{}{}", name, env::consts::EXE_SUFFIX));
        let output = Command::new(&binary)
            .output()
            .with_context(|| format!("Failed to run {}", binary.display()))?;

        let Some(code) = output.status.code() else {
            bail!("{} was terminated by a signal", name);
        };
        if code != *expected {
            bail!(
                "{} exited with {}, expected {}\n{}",
                name,
                code,
                expected,
                String::from_utf8_lossy(&output.stdout)
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.starts_with("Test started: ") {
            bail!("{} did not print the start banner", name);
        }
        println!("  {} -> {}", name, code);
    }

    Ok(())
}

/// Quick check (no demos)
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--workspace"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet", "--workspace"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--workspace", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

/// Where `cargo build --examples` puts binaries, honoring `CARGO_TARGET_DIR`.
fn examples_dir(root: &Path, target_dir: Option<OsString>) -> PathBuf {
    let target = match target_dir {
        Some(dir) => root.join(dir),
        None => root.join("target"),
    };
    target.join("debug").join("examples")
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}
