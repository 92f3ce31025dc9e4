// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Flight Basar library - terminal client for the flight search demo
//!
//! This crate resolves free-text airport input against the backend's airport
//! list, runs flight searches, and loads weather and points of interest for
//! the selected destination.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod directory;
pub mod error;
pub mod events;
pub mod render;
pub mod session;

/// Wire data types served by the flight-basar backend
pub mod types {
    use serde::{Deserialize, Deserializer, Serialize};

    /// Treat an explicit JSON `null` the same as a missing field
    fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    // =========================================================================
    // Airports
    // =========================================================================

    /// Airport record as listed in `/static/airports.json`
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Airport {
        /// Display name, usually the city
        #[serde(default, deserialize_with = "null_as_default")]
        pub name: String,
        /// IATA code (may be empty)
        #[serde(default, deserialize_with = "null_as_default")]
        pub code: String,
        /// Latitude in degrees
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub lat: Option<f64>,
        /// Longitude in degrees
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub lon: Option<f64>,
    }

    impl Airport {
        /// Create an airport without coordinates
        #[must_use]
        pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                code: code.into(),
                lat: None,
                lon: None,
            }
        }

        /// Attach coordinates
        #[must_use]
        pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
            self.lat = Some(lat);
            self.lon = Some(lon);
            self
        }

        /// Both coordinates, if known
        #[must_use]
        pub fn coordinates(&self) -> Option<(f64, f64)> {
            self.lat.zip(self.lon)
        }

        /// Directory key: uppercased code if present, else lowercased name
        #[must_use]
        pub fn key(&self) -> Option<String> {
            let code = self.code.trim();
            if !code.is_empty() {
                return Some(code.to_uppercase());
            }
            let name = self.name.trim();
            if name.is_empty() {
                None
            } else {
                Some(name.to_lowercase())
            }
        }

        /// Human-readable label, `"Name (CODE)"`
        ///
        /// Falls back to whichever of name or code is present. A name that
        /// already ends in a parenthesized code is returned unchanged.
        #[must_use]
        pub fn display_name(&self) -> String {
            let name = self.name.trim();
            let code = self.code.trim().to_uppercase();

            match (name.is_empty(), code.is_empty()) {
                (false, false) if trailing_code(name).is_some() => name.to_string(),
                (false, false) => format!("{name} ({code})"),
                (false, true) => name.to_string(),
                (true, _) => code,
            }
        }
    }

    /// Whether `s` is exactly three ASCII alphanumeric characters
    #[must_use]
    pub fn is_code(s: &str) -> bool {
        s.len() == 3 && s.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    /// The `XYZ` of a trailing `(XYZ)`, if present
    #[must_use]
    pub fn trailing_code(s: &str) -> Option<&str> {
        let bytes = s.as_bytes();
        let len = bytes.len();
        if len < 5 || bytes[len - 5] != b'(' || bytes[len - 1] != b')' {
            return None;
        }
        let code = &s[len - 4..len - 1];
        is_code(code).then_some(code)
    }

    // =========================================================================
    // Flights
    // =========================================================================

    /// One end of a flight (departure or arrival)
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct FlightEndpoint {
        /// IATA airport code
        #[serde(default)]
        pub iata: Option<String>,
        /// Airport name as reported by the flight provider
        #[serde(default)]
        pub airport: Option<String>,
        /// Scheduled time (ISO 8601)
        #[serde(default)]
        pub scheduled: Option<String>,
        /// IANA timezone of the airport
        #[serde(default)]
        pub timezone: Option<String>,
        /// Terminal
        #[serde(default)]
        pub terminal: Option<String>,
        /// Gate
        #[serde(default)]
        pub gate: Option<String>,
    }

    /// Flight designator
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct FlightNumber {
        /// IATA flight code, e.g. `LX14`
        #[serde(default)]
        pub iata: Option<String>,
        /// Bare flight number, e.g. `14`
        #[serde(default)]
        pub number: Option<String>,
    }

    /// Operating airline
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Airline {
        /// Airline name
        #[serde(default)]
        pub name: Option<String>,
    }

    /// Flight returned by `/flights/{dep}/{arr}`
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Flight {
        /// Departure side
        #[serde(default, deserialize_with = "null_as_default")]
        pub departure: FlightEndpoint,
        /// Arrival side
        #[serde(default, deserialize_with = "null_as_default")]
        pub arrival: FlightEndpoint,
        /// Flight designator
        #[serde(default, deserialize_with = "null_as_default")]
        pub flight: FlightNumber,
        /// Operating airline
        #[serde(default)]
        pub airline: Option<Airline>,
        /// Date of operation
        #[serde(default)]
        pub flight_date: Option<String>,
    }

    impl Flight {
        /// Best available flight designator
        #[must_use]
        pub fn designator(&self) -> Option<&str> {
            self.flight
                .iata
                .as_deref()
                .or(self.flight.number.as_deref())
                .filter(|s| !s.is_empty())
        }
    }

    // =========================================================================
    // Weather
    // =========================================================================

    /// Current weather plus daily forecast from `/api/weather`
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Weather {
        /// City label echoed by the backend
        #[serde(default)]
        pub city: Option<String>,
        /// Current temperature in °C
        #[serde(default)]
        pub temperature: Option<f64>,
        /// WMO weather code
        #[serde(default)]
        pub weather_code: Option<i32>,
        /// Localized weather description
        #[serde(default)]
        pub weather_text: Option<String>,
        /// Wind speed in km/h
        #[serde(default)]
        pub wind: Option<f64>,
        /// Observation time
        #[serde(default)]
        pub time: Option<String>,
        /// Daily forecast
        #[serde(default, deserialize_with = "null_as_default")]
        pub forecast: Vec<ForecastDay>,
    }

    impl Weather {
        /// Weather text, derived from the code when the backend omitted it
        #[must_use]
        pub fn text(&self) -> &str {
            describe(self.weather_text.as_deref(), self.weather_code)
        }
    }

    /// One day of the forecast
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct ForecastDay {
        /// ISO date (`YYYY-MM-DD`)
        #[serde(default)]
        pub date: String,
        /// WMO weather code
        #[serde(default)]
        pub weather_code: Option<i32>,
        /// Localized weather description
        #[serde(default)]
        pub weather_text: Option<String>,
        /// Maximum temperature in °C
        #[serde(default)]
        pub tmax: Option<f64>,
        /// Minimum temperature in °C
        #[serde(default)]
        pub tmin: Option<f64>,
        /// Precipitation in mm
        #[serde(default)]
        pub precipitation_sum: Option<f64>,
    }

    impl ForecastDay {
        /// Weather text, derived from the code when the backend omitted it
        #[must_use]
        pub fn text(&self) -> &str {
            describe(self.weather_text.as_deref(), self.weather_code)
        }
    }

    fn describe(text: Option<&str>, code: Option<i32>) -> &str {
        match text {
            Some(t) if !t.is_empty() => t,
            _ => code.map_or("Unbekannt", weather_label),
        }
    }

    /// German label for a WMO weather code
    #[must_use]
    pub fn weather_label(code: i32) -> &'static str {
        match code {
            0 => "Klar",
            1 => "Überwiegend klar",
            2 => "Teilweise bewölkt",
            3 => "Bewölkt",
            45 => "Nebel",
            48 => "Nebel mit Raureif",
            51 => "Leichter Nieselregen",
            53 => "Mässiger Nieselregen",
            55 => "Starker Nieselregen",
            61 => "Leichter Regen",
            63 => "Mässiger Regen",
            65 => "Starker Regen",
            71 => "Leichter Schneefall",
            73 => "Mässiger Schneefall",
            75 => "Starker Schneefall",
            80 => "Leichte Regenschauer",
            81 => "Mässige Regenschauer",
            82 => "Starke Regenschauer",
            95 => "Gewitter",
            _ => "Unbekannt",
        }
    }

    /// How the weather endpoint is addressed
    #[derive(Debug, Clone, PartialEq)]
    pub enum WeatherQuery {
        /// `?lat=&lon=&label=`
        Coordinates {
            /// Latitude in degrees
            lat: f64,
            /// Longitude in degrees
            lon: f64,
            /// Label echoed back as the city name
            label: String,
        },
        /// `?city=` (backend's fixed city table)
        City(String),
    }

    // =========================================================================
    // Places
    // =========================================================================

    /// A point on the map
    #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
    pub struct GeoPoint {
        /// Latitude in degrees
        pub lat: f64,
        /// Longitude in degrees
        pub lon: f64,
    }

    /// Point of interest
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Place {
        /// Name of the sight
        #[serde(default, deserialize_with = "null_as_default")]
        pub name: String,
        /// Formatted address
        #[serde(default, deserialize_with = "null_as_default")]
        pub formatted: String,
        /// Latitude in degrees
        #[serde(default)]
        pub lat: Option<f64>,
        /// Longitude in degrees
        #[serde(default)]
        pub lon: Option<f64>,
        /// Distance from the center in meters
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub distance: Option<f64>,
    }

    /// Points of interest around a city from `/api/places`
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Places {
        /// City the backend searched around
        #[serde(default)]
        pub city: Option<String>,
        /// Map center
        pub center: GeoPoint,
        /// Sights, nearest first
        #[serde(default, deserialize_with = "null_as_default")]
        pub places: Vec<Place>,
    }

    // =========================================================================
    // Server time
    // =========================================================================

    /// Response of `/time`
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct ServerTime {
        /// Server clock, preformatted
        #[serde(default)]
        pub server_time: Option<String>,
    }

    /// Error body the backend sends with non-2xx responses
    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct ErrorBody {
        /// Human-readable message
        #[serde(default)]
        pub error: Option<String>,
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::directory::{AirportDirectory, Directory};
    pub use crate::error::ClientError;
    pub use crate::session::Session;
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
