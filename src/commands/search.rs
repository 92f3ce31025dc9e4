// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Search command - flights between two airports plus destination panels

use super::Output;
use crate::config::Config;
use crate::render;
use crate::session::{FlightSearch, Session};
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct SearchOutput<'a> {
    #[serde(flatten)]
    search: &'a FlightSearch,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<crate::session::ArrivalReport>,
}

/// Run the search command
pub async fn run(
    config: &Config,
    out: Output,
    from: &str,
    to: &str,
    no_panels: bool,
) -> Result<()> {
    let session = Session::connect(config).context("Failed to set up backend client")?;
    super::warn_if_no_airports(&*session.airports().await, config);

    let search = session.search_flights(from, to).await?;

    let destination = if no_panels {
        None
    } else {
        Some(session.panels().load(Some(&search.arrival)).await)
    };

    if out.json {
        return out.print_json(&SearchOutput {
            search: &search,
            destination,
        });
    }

    out.print_text(&render::flights_table(
        &search.departure,
        &search.arrival,
        &search.flights,
        out.style,
    ))?;

    if let Some(report) = destination {
        println!();
        out.print_text(&render::arrival_report(&report, out.style))?;
    }

    Ok(())
}
