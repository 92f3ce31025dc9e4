// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! HTTP client for the flight-basar backend
//!
//! The backend owns five read-only endpoints. [`Backend`] is the seam the rest
//! of the crate talks to; [`HttpBackend`] is the `reqwest` implementation.

use crate::error::{ClientError, ErrorReply};
use crate::types::{Airport, ErrorBody, Flight, Places, ServerTime, Weather, WeatherQuery};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use urlencoding::encode;

/// Path of the static airport list
pub const AIRPORTS_PATH: &str = "/static/airports.json";

/// Path of the server clock
pub const TIME_PATH: &str = "/time";

/// Read access to the flight-basar backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /static/airports.json`
    async fn airports(&self) -> Result<Vec<Airport>, ClientError>;

    /// `GET /flights/{departure}/{arrival}`
    async fn flights(&self, departure: &str, arrival: &str) -> Result<Vec<Flight>, ClientError>;

    /// `GET /api/weather`
    async fn weather(&self, query: &WeatherQuery) -> Result<Weather, ClientError>;

    /// `GET /api/places?city=`
    async fn places(&self, city: &str) -> Result<Places, ClientError>;

    /// `GET /time`
    async fn server_time(&self) -> Result<ServerTime, ClientError>;
}

/// Path for a flight search between two airport codes
#[must_use]
pub fn flights_path(departure: &str, arrival: &str) -> String {
    format!("/flights/{}/{}", encode(departure), encode(arrival))
}

/// Path and query for a weather lookup
#[must_use]
pub fn weather_path(query: &WeatherQuery) -> String {
    match query {
        WeatherQuery::Coordinates { lat, lon, label } => {
            format!("/api/weather?lat={lat}&lon={lon}&label={}", encode(label))
        }
        WeatherQuery::City(city) => format!("/api/weather?city={}", encode(city)),
    }
}

/// Path and query for a points-of-interest lookup
#[must_use]
pub fn places_path(city: &str) -> String {
    format!("/api/places?city={}", encode(city))
}

/// Classify the body of a non-2xx response
#[must_use]
pub fn error_reply(body: &str) -> ErrorReply {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(message),
        }) if !message.trim().is_empty() => ErrorReply::Message(message),
        Ok(_) => ErrorReply::Unexplained,
        Err(_) => ErrorReply::Unreadable,
    }
}

/// `reqwest`-backed [`Backend`]
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("flight-basar/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let request_error = |source| ClientError::Request {
            path: path.to_string(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(request_error)?;
        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        if !status.is_success() {
            debug!("{} answered {}", path, status);
            return Err(ClientError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                reply: error_reply(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn airports(&self) -> Result<Vec<Airport>, ClientError> {
        self.get_json(AIRPORTS_PATH).await
    }

    async fn flights(&self, departure: &str, arrival: &str) -> Result<Vec<Flight>, ClientError> {
        self.get_json(&flights_path(departure, arrival)).await
    }

    async fn weather(&self, query: &WeatherQuery) -> Result<Weather, ClientError> {
        self.get_json(&weather_path(query)).await
    }

    async fn places(&self, city: &str) -> Result<Places, ClientError> {
        self.get_json(&places_path(city)).await
    }

    async fn server_time(&self) -> Result<ServerTime, ClientError> {
        self.get_json(TIME_PATH).await
    }
}
