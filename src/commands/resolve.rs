// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Resolve command - map free text to a single airport

use super::Output;
use crate::config::Config;
use crate::session::Session;
use anyhow::{Context, Result};

/// Run the resolve command
pub async fn run(config: &Config, out: Output, input: &str) -> Result<()> {
    let session = Session::connect(config).context("Failed to set up backend client")?;
    let directory = session.airports().await;
    super::warn_if_no_airports(&directory, config);

    let Some(airport) = directory.resolve(input) else {
        let candidates = directory.search(input, 5);
        if candidates.len() > 1 {
            eprintln!("Multiple airports match '{}':", input.trim());
            for a in &candidates {
                eprintln!("  {}", a.display_name());
            }
        }
        anyhow::bail!("No unique airport matches {:?}", input.trim());
    };

    if out.json {
        return out.print_json(airport);
    }

    println!("{}", airport.display_name());
    if let Some((lat, lon)) = airport.coordinates() {
        println!("  lat: {lat}");
        println!("  lon: {lon}");
    }
    Ok(())
}
