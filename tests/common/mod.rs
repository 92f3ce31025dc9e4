// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Shared test helpers: an in-process backend with canned responses

#![allow(dead_code)]

use async_trait::async_trait;
use flight_basar::client::Backend;
use flight_basar::error::{ClientError, ErrorReply};
use flight_basar::types::{
    Airport, Flight, FlightEndpoint, FlightNumber, GeoPoint, Place, Places, ServerTime, Weather,
    WeatherQuery,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Build a status error the way the HTTP client would
pub fn status_error(path: &str, status: u16, message: &str) -> ClientError {
    bare_status_error(path, status, ErrorReply::Message(message.into()))
}

/// Status error whose body carried no `error` text
pub fn bare_status_error(path: &str, status: u16, reply: ErrorReply) -> ClientError {
    ClientError::Status {
        path: path.into(),
        status,
        reply,
    }
}

/// Build a decode error the way the HTTP client would
pub fn decode_error(path: &str) -> ClientError {
    ClientError::Decode {
        path: path.into(),
        source: serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
    }
}

pub fn swiss_airports() -> Vec<Airport> {
    vec![
        Airport::new("Zürich", "ZRH").with_coordinates(47.4647, 8.5492),
        Airport::new("Genf", "GVA").with_coordinates(46.2381, 6.1089),
        Airport::new("Basel", "BSL").with_coordinates(47.59, 7.5291),
        Airport::new("Bern", "BRN"),
        Airport::new("New York", "JFK").with_coordinates(40.6413, -73.7781),
        // duplicate code, must be ignored
        Airport::new("Zurich Kloten", "zrh"),
    ]
}

pub fn flight(designator: &str, dep: &str, arr: &str) -> Flight {
    Flight {
        departure: FlightEndpoint {
            iata: Some(dep.into()),
            scheduled: Some("2025-01-01T10:00:00+00:00".into()),
            ..FlightEndpoint::default()
        },
        arrival: FlightEndpoint {
            iata: Some(arr.into()),
            scheduled: Some("2025-01-01T13:10:00+00:00".into()),
            ..FlightEndpoint::default()
        },
        flight: FlightNumber {
            iata: Some(designator.into()),
            number: None,
        },
        airline: None,
        flight_date: Some("2025-01-01".into()),
    }
}

pub fn sunny() -> Weather {
    Weather {
        temperature: Some(21.5),
        weather_code: Some(0),
        weather_text: Some("Klar".into()),
        wind: Some(12.0),
        time: Some("2025-01-13T12:00".into()),
        ..Weather::default()
    }
}

pub fn sights(city: &str) -> Places {
    Places {
        city: Some(city.into()),
        center: GeoPoint { lat: 47.3769, lon: 8.5417 },
        places: vec![Place {
            name: "Grossmünster".into(),
            formatted: "Grossmünsterplatz, 8001 Zürich".into(),
            lat: Some(47.37),
            lon: Some(8.544),
            distance: None,
        }],
    }
}

/// Backend double recording every call
pub struct FakeBackend {
    pub airports: Mutex<Option<Result<Vec<Airport>, ClientError>>>,
    pub airports_delay: Duration,
    pub flights: Vec<Flight>,
    pub fail_flights: bool,
    pub fail_weather: bool,
    pub airport_calls: AtomicUsize,
    pub flight_calls: Mutex<Vec<(String, String)>>,
    pub weather_calls: Mutex<Vec<WeatherQuery>>,
    pub places_calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new(airports: Vec<Airport>) -> Self {
        Self::with_airports(Ok(airports))
    }

    pub fn failing() -> Self {
        Self::with_airports(Err(bare_status_error(
            "/static/airports.json",
            500,
            ErrorReply::Unreadable,
        )))
    }

    fn with_airports(airports: Result<Vec<Airport>, ClientError>) -> Self {
        Self {
            airports: Mutex::new(Some(airports)),
            airports_delay: Duration::ZERO,
            flights: Vec::new(),
            fail_flights: false,
            fail_weather: false,
            airport_calls: AtomicUsize::new(0),
            flight_calls: Mutex::new(Vec::new()),
            weather_calls: Mutex::new(Vec::new()),
            places_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn airport_calls(&self) -> usize {
        self.airport_calls.load(Ordering::SeqCst)
    }

    pub fn flight_calls(&self) -> Vec<(String, String)> {
        self.flight_calls.lock().unwrap().clone()
    }

    pub fn weather_calls(&self) -> Vec<WeatherQuery> {
        self.weather_calls.lock().unwrap().clone()
    }

    pub fn places_calls(&self) -> Vec<String> {
        self.places_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn airports(&self) -> Result<Vec<Airport>, ClientError> {
        self.airport_calls.fetch_add(1, Ordering::SeqCst);
        if !self.airports_delay.is_zero() {
            tokio::time::sleep(self.airports_delay).await;
        }
        // A second fetch gets a decode error so re-fetching is visible
        self.airports
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(decode_error("/static/airports.json")))
    }

    async fn flights(&self, departure: &str, arrival: &str) -> Result<Vec<Flight>, ClientError> {
        self.flight_calls
            .lock()
            .unwrap()
            .push((departure.to_string(), arrival.to_string()));
        if self.fail_flights {
            return Err(status_error("/flights", 502, "Flugdienst nicht erreichbar"));
        }
        Ok(self.flights.clone())
    }

    async fn weather(&self, query: &WeatherQuery) -> Result<Weather, ClientError> {
        self.weather_calls.lock().unwrap().push(query.clone());
        if self.fail_weather {
            return Err(decode_error("/api/weather"));
        }
        if let WeatherQuery::Coordinates { label, .. } = query {
            let reply = match label.as_str() {
                "Offline" => Some(ErrorReply::Unreadable),
                "Quiet" => Some(ErrorReply::Unexplained),
                _ => None,
            };
            if let Some(reply) = reply {
                return Err(bare_status_error("/api/weather", 500, reply));
            }
        }
        Ok(sunny())
    }

    async fn places(&self, city: &str) -> Result<Places, ClientError> {
        self.places_calls.lock().unwrap().push(city.to_string());
        let failure = match city {
            "Nowhere" => Some(ErrorReply::Message("GEOAPIFY_API_KEY fehlt".into())),
            "Offline" => Some(ErrorReply::Unreadable),
            "Quiet" => Some(ErrorReply::Unexplained),
            _ => None,
        };
        if let Some(reply) = failure {
            return Err(bare_status_error("/api/places", 500, reply));
        }
        Ok(sights(city))
    }

    async fn server_time(&self) -> Result<ServerTime, ClientError> {
        Ok(ServerTime {
            server_time: Some("2025-01-13 12:00:00".into()),
        })
    }
}
