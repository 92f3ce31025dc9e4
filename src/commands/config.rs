// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - print the effective configuration

use super::Output;
use crate::config::{self, Config};
use anyhow::{Context, Result};

/// Print the effective configuration
pub fn run(config: &Config, out: Output) -> Result<()> {
    if out.json {
        return out.print_json(config);
    }

    let text = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    match config::default_path() {
        Some(path) => println!("# default config file: {}", path.display()),
        None => println!("# no default config directory on this platform"),
    }
    out.print_text(&text)
}
