// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Command-line flags accepted by every suite binary.
//!
//! Suite binaries are often launched by other tools (`cargo test -- <flags>`
//! forwards its flags to every test binary), so parsing is lenient: unknown
//! flags are ignored and anything unparseable falls back to the defaults.
//! Only `--help` short-circuits the run.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use crate::display::Style;

/// When to color the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(
    about = "Run this test suite; exits 0 when every test case passes, 1 otherwise",
    ignore_errors = true,
    disable_version_flag = true
)]
pub struct RunConfig {
    /// When to color the report
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Print each test case name before it runs
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunConfig {
    /// Configuration from the process arguments.
    pub fn from_args() -> Self {
        Self::parse_lenient(std::env::args_os())
    }

    /// Parse `args` (program name first), falling back to the defaults.
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match RunConfig::try_parse_from(args) {
            Ok(config) => config,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    err.exit()
                }
                _ => RunConfig::default(),
            },
        }
    }

    /// No colors, no progress lines.
    pub fn plain() -> Self {
        RunConfig {
            color: ColorChoice::Never,
            verbose: false,
        }
    }

    pub fn style(&self) -> Style {
        Style::for_choice(self.color)
    }
}
