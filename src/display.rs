// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal styling for the runner's report.
//!
//! The report is a handful of plain lines; color only marks the verdict. Red
//! for a failure, green for the completion line, gray for progress. OneDark
//! for dark terminals, One Light for light ones. `NO_COLOR` and non-TTY
//! stdout turn styling off unless `--color always` asks for it.
//!
//! # Theme detection order
//!
//! 1. `VERDICT_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;

use crate::config::ColorChoice;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("VERDICT_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; backgrounds 7 and up (except 8) are light.
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

/// Get the current theme (cached)
pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        fn $name(theme: Theme) -> String {
            let (r, g, b) = match theme {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// STYLE
// ═══════════════════════════════════════════════════════════════════════════

/// Whether stdout should get colors when the user did not say.
pub fn stdout_supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Resolved styling for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    theme: Option<Theme>,
}

impl Style {
    pub const fn plain() -> Self {
        Style { theme: None }
    }

    pub const fn colored(theme: Theme) -> Self {
        Style { theme: Some(theme) }
    }

    pub fn for_choice(choice: ColorChoice) -> Self {
        let enabled = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => stdout_supports_color(),
        };
        if enabled {
            Style::colored(theme())
        } else {
            Style::plain()
        }
    }

    pub fn is_colored(&self) -> bool {
        self.theme.is_some()
    }

    fn paint(&self, color_fn: fn(Theme) -> String, modifiers: &[&str], text: &str) -> String {
        match self.theme {
            Some(theme) => format!("{}{}{}{}", modifiers.join(""), color_fn(theme), text, RESET),
            None => text.to_string(),
        }
    }

    pub fn failure(&self, text: &str) -> String {
        self.paint(RED, &[BOLD], text)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(GREEN, &[BOLD], text)
    }

    pub fn progress(&self, text: &str) -> String {
        self.paint(GRAY, &[], text)
    }
}
