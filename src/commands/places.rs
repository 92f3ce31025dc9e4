// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Places command - sights around a city

use super::Output;
use crate::config::Config;
use crate::directory::city_name_for_places;
use crate::render;
use crate::session::Session;
use anyhow::{Context, Result};

/// Run the places command
pub async fn run(config: &Config, out: Output, city: Option<String>) -> Result<()> {
    let session = Session::connect(config).context("Failed to set up backend client")?;
    let city = city_name_for_places(city.as_deref().unwrap_or_default(), &config.default_city);

    let places = session
        .backend()
        .places(&city)
        .await
        .with_context(|| format!("Failed to load sights for {city}"))?;

    if out.json {
        return out.print_json(&places);
    }
    out.print_text(&render::places_panel(&places, out.style))
}
