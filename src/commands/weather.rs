// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Weather command - current weather and forecast for an airport or city

use super::Output;
use crate::config::Config;
use crate::render;
use crate::session::Session;
use crate::types::WeatherQuery;
use anyhow::{Context, Result};

/// Run the weather command
///
/// An airport is looked up by coordinates; `--city` uses the backend's own
/// city table instead.
pub async fn run(
    config: &Config,
    out: Output,
    airport: Option<String>,
    city: Option<String>,
) -> Result<()> {
    let session = Session::connect(config).context("Failed to set up backend client")?;

    let (label, query) = match (airport, city) {
        (_, Some(city)) => (city.clone(), WeatherQuery::City(city)),
        (Some(input), None) => {
            let airport = session
                .resolve(&input)
                .await
                .ok_or_else(|| anyhow::anyhow!("No unique airport matches {:?}", input.trim()))?;
            let (lat, lon) = airport.coordinates().ok_or_else(|| {
                anyhow::anyhow!("{} has no coordinates in airports.json", airport.display_name())
            })?;
            (
                airport.name.clone(),
                WeatherQuery::Coordinates {
                    lat,
                    lon,
                    label: airport.name,
                },
            )
        }
        (None, None) => anyhow::bail!("Either an airport or --city is required"),
    };

    let weather = session
        .backend()
        .weather(&query)
        .await
        .with_context(|| format!("Failed to load weather for {label}"))?;

    if out.json {
        return out.print_json(&weather);
    }
    out.print_text(&render::weather_panel(&label, &weather, out.style))
}
