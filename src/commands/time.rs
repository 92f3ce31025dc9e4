// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Time command - backend server clock

use super::Output;
use crate::config::Config;
use crate::render;
use crate::session::Session;
use anyhow::{Context, Result};

/// Print the backend's clock; failures are shown, not returned
pub async fn run(config: &Config, out: Output) -> Result<()> {
    let session = Session::connect(config).context("Failed to set up backend client")?;
    let result = session.backend().server_time().await;

    if out.json {
        return match result {
            Ok(time) => out.print_json(&time),
            Err(e) => Err(e).context("Failed to load server time"),
        };
    }

    println!("Serverzeit: {}", render::server_time_line(&result));
    Ok(())
}
