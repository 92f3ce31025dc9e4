// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod airports;
pub mod completions;
pub mod config;
pub mod places;
pub mod resolve;
pub mod search;
pub mod shell;
pub mod time;
pub mod weather;

use crate::config::Config;
use crate::directory::Directory;
use crate::render::Style;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

/// How command results are printed
#[derive(Debug, Clone, Copy)]
pub struct Output {
    /// Text styling
    pub style: Style,
    /// Print JSON instead of text panels
    pub json: bool,
}

impl Output {
    /// Print `value` as pretty JSON to stdout
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }

    /// Print a rendered panel to stdout
    pub fn print_text(&self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Tell the user why nothing resolves when the airport list is missing
pub fn warn_if_no_airports(directory: &Directory, config: &Config) {
    if directory.is_empty() {
        eprintln!(
            "Warning: No airports known. Is the backend at {} reachable?",
            config.base_url
        );
    }
}
