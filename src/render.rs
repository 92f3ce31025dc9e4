// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Text panels for flights, destination weather, sights and server time

use crate::error::ClientError;
use crate::session::{ArrivalReport, Panel};
use crate::types::{Airport, Flight, FlightEndpoint, ForecastDay, Places, ServerTime, Weather};
use chrono::{Datelike, NaiveDate, Weekday};
use owo_colors::OwoColorize;
use std::fmt::Write;

const MISSING: &str = "–";

/// Terminal styling switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Use ANSI colors
    pub color: bool,
}

impl Style {
    /// No colors, for pipes and tests
    pub const PLAIN: Self = Self { color: false };

    fn heading(self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn error(self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Emoji for a WMO weather code
#[must_use]
pub fn weather_emoji(code: Option<i32>) -> &'static str {
    match code {
        Some(0) => "☀️",
        Some(1) => "🌤️",
        Some(2) => "⛅",
        Some(3) => "☁️",
        Some(45 | 48) => "🌫️",
        Some(51..=57) => "🌦️",
        Some(61..=67 | 80..=82) => "🌧️",
        Some(71..=77 | 85 | 86) => "🌨️",
        Some(c) if c >= 95 => "⛈️",
        _ => "❓",
    }
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

fn german_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Di",
        Weekday::Wed => "Mi",
        Weekday::Thu => "Do",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "So",
    }
}

/// Forecast date as `Mo., 13.01.`; unparseable dates are shown verbatim
#[must_use]
pub fn forecast_day_label(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => format!("{}., {:02}.{:02}.", german_weekday(d.weekday()), d.day(), d.month()),
        Err(_) => date.to_string(),
    }
}

/// One forecast line
#[must_use]
pub fn forecast_card(day: &ForecastDay) -> String {
    let precipitation = day
        .precipitation_sum
        .map_or_else(|| MISSING.to_string(), |p| format!("{p} mm"));
    format!(
        "{}  {}  {}  {}° / {}°  Niederschlag: {}",
        forecast_day_label(&day.date),
        weather_emoji(day.weather_code),
        day.text(),
        number(day.tmax),
        number(day.tmin),
        precipitation
    )
}

/// Current weather with forecast for `label`
#[must_use]
pub fn weather_panel(label: &str, weather: &Weather, style: Style) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style.heading(&format!("🌤 Wetter am Ziel: {label}")));
    let _ = writeln!(
        out,
        "{} {}°C  {}",
        weather_emoji(weather.weather_code),
        number(weather.temperature),
        weather.text()
    );
    let _ = writeln!(
        out,
        "{}",
        style.dim(&format!(
            "Wind: {} km/h · Stand: {}",
            number(weather.wind),
            weather.time.as_deref().unwrap_or(MISSING)
        ))
    );
    for day in &weather.forecast {
        let _ = writeln!(out, "  {}", forecast_card(day));
    }
    out
}

/// Numbered list of sights around the map center
///
/// Places without coordinates are left out; numbering keeps their slot.
#[must_use]
pub fn places_panel(places: &Places, style: Style) -> String {
    let mut out = String::new();
    let city = places.city.as_deref().unwrap_or("Ziel");
    let _ = writeln!(
        out,
        "{} {}",
        style.heading(&format!("📍 Sehenswürdigkeiten: {city}")),
        style.dim(&format!("({}, {})", places.center.lat, places.center.lon))
    );

    let mut shown = 0usize;
    for (i, place) in places.places.iter().enumerate() {
        let (Some(lat), Some(lon)) = (place.lat, place.lon) else {
            continue;
        };
        shown += 1;
        let _ = writeln!(out, "  {:>2}. {}", i + 1, place.name);
        if !place.formatted.is_empty() {
            let _ = writeln!(out, "      {}", place.formatted);
        }
        let _ = writeln!(out, "      {}", style.dim(&format!("{lat}, {lon}")));
    }

    if shown == 0 {
        let _ = writeln!(out, "  Keine Sehenswürdigkeiten gefunden.");
    }
    out
}

fn endpoint(side: &FlightEndpoint) -> String {
    let mut s = format!(
        "{} {}",
        side.iata.as_deref().unwrap_or(MISSING),
        side.scheduled.as_deref().unwrap_or(MISSING)
    );
    if let Some(tz) = side.timezone.as_deref() {
        let _ = write!(s, " ({tz})");
    }
    s
}

/// Flight search results, one line per flight
#[must_use]
pub fn flights_table(
    departure: &Airport,
    arrival: &Airport,
    flights: &[Flight],
    style: Style,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        style.heading(&format!(
            "Flüge {} → {} ({})",
            departure.display_name(),
            arrival.display_name(),
            flights.len()
        ))
    );

    if flights.is_empty() {
        let _ = writeln!(out, "  Keine Flüge gefunden.");
        return out;
    }

    for flight in flights {
        let mut line = format!(
            "  {:<8} {} → {}",
            flight.designator().unwrap_or(MISSING),
            endpoint(&flight.departure),
            endpoint(&flight.arrival)
        );
        if let Some(name) = flight.airline.as_ref().and_then(|a| a.name.as_deref()) {
            let _ = write!(line, "  {name}");
        }
        let _ = writeln!(out, "{line}");
    }
    out
}

fn panel<T>(panel: &Panel<T>, style: Style, loaded: impl Fn(&T) -> String) -> String {
    match panel {
        Panel::Loaded(value) => loaded(value),
        Panel::Unavailable(message) => format!("{message}\n"),
        Panel::Failed(message) => format!("{}\n", style.error(message)),
    }
}

/// Weather and sights for the selected arrival airport
#[must_use]
pub fn arrival_report(report: &ArrivalReport, style: Style) -> String {
    let Some(airport) = report.airport.as_ref() else {
        return "Suche zuerst einen Flug, dann lade ich Wetter und Sehenswürdigkeiten.\n"
            .to_string();
    };

    let mut out = panel(&report.weather, style, |w| weather_panel(&airport.name, w, style));
    if !matches!(report.weather, Panel::Loaded(_)) {
        let heading = style.heading(&format!("🌤 Wetter am Ziel: {}", airport.name));
        out = format!("{heading}\n{out}");
    }
    out.push('\n');
    out.push_str(&panel(&report.places, style, |p| places_panel(p, style)));
    out
}

/// Server clock line for `/time`
#[must_use]
pub fn server_time_line(result: &Result<ServerTime, ClientError>) -> String {
    match result {
        Ok(time) => time
            .server_time
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("—")
            .to_string(),
        Err(e) => match e.status() {
            Some(status) => format!("Fehler ({status})"),
            None => "Fehler".to_string(),
        },
    }
}
