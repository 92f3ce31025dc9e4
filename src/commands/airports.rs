// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Airports command - list and search the airport directory

use super::Output;
use crate::config::Config;
use crate::session::Session;
use anyhow::{Context, Result};
use tracing::info;

/// Run the airports command
pub async fn run(config: &Config, out: Output, query: Option<String>, limit: usize) -> Result<()> {
    let session = Session::connect(config).context("Failed to set up backend client")?;
    let directory = session.airports().await;

    super::warn_if_no_airports(&directory, config);

    let query = query.unwrap_or_default();
    info!("Searching airports for {:?}", query);
    let hits = directory.search(&query, limit);

    if out.json {
        return out.print_json(&hits);
    }

    if hits.is_empty() {
        println!("No airports match {:?}", query);
        return Ok(());
    }

    println!("Airports ({} of {}):", hits.len(), directory.len());
    for airport in hits {
        match airport.coordinates() {
            Some((lat, lon)) => println!("  {}  [{}, {}]", airport.display_name(), lat, lon),
            None => println!("  {}", airport.display_name()),
        }
    }

    Ok(())
}
