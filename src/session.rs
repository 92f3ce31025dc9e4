// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Client session - flight search and destination panels
//!
//! A [`Session`] lives for one CLI invocation or one interactive shell. It owns
//! the backend handle, the airport directory and the arrival channel that
//! connects a successful search to the weather and sights panels.

use crate::client::{Backend, HttpBackend};
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::directory::{city_name_for_places, AirportDirectory, Directory};
use crate::error::{ClientError, ErrorReply};
use crate::events::ArrivalEvents;
use crate::types::{Airport, Flight, Places, Weather, WeatherQuery};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Default delay before destination panels reload
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Fallback city for the sights lookup
pub const DEFAULT_CITY: &str = "Zürich";

/// Which side of the search an input belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    /// Departure airport
    Departure,
    /// Arrival airport
    Arrival,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Departure => f.write_str("departure"),
            Self::Arrival => f.write_str("arrival"),
        }
    }
}

/// Why a flight search did not produce results
#[derive(Debug, Error)]
pub enum SearchError {
    /// Input matched no airport, or more than one
    #[error("no unique {leg} airport matches {input:?}")]
    Unresolved {
        /// Offending side
        leg: Leg,
        /// What the user typed
        input: String,
    },

    /// The airport resolved but has no IATA code to search with
    #[error("{leg} airport {airport} has no IATA code")]
    MissingCode {
        /// Offending side
        leg: Leg,
        /// Display name of the airport
        airport: String,
    },

    /// The flights endpoint failed
    #[error("flight search failed: {0}")]
    Backend(#[from] ClientError),
}

/// Successful flight search
#[derive(Debug, Clone, Serialize)]
pub struct FlightSearch {
    /// Resolved departure airport
    pub departure: Airport,
    /// Resolved arrival airport
    pub arrival: Airport,
    /// Flights returned by the backend
    pub flights: Vec<Flight>,
}

/// State of one destination panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Panel<T> {
    /// Data arrived
    Loaded(T),
    /// Nothing was requested, with the reason
    Unavailable(String),
    /// The request failed, with a message for the user
    Failed(String),
}

impl<T> Panel<T> {
    /// Loaded data, if any
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Weather and sights for the selected arrival airport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrivalReport {
    /// Selected arrival airport, `None` before the first search
    pub airport: Option<Airport>,
    /// Weather panel
    pub weather: Panel<Weather>,
    /// Sights panel
    pub places: Panel<Places>,
}

impl ArrivalReport {
    /// Report for "no destination selected yet"
    #[must_use]
    pub fn empty() -> Self {
        let hint = "Suche zuerst einen Flug, damit ein Ziel gesetzt ist.".to_string();
        Self {
            airport: None,
            weather: Panel::Unavailable(hint.clone()),
            places: Panel::Unavailable(hint),
        }
    }
}

/// Loads the destination panels for an airport
#[derive(Clone)]
pub struct ArrivalPanels {
    backend: Arc<dyn Backend>,
    default_city: String,
}

impl ArrivalPanels {
    /// Create panels that fall back to `default_city` for sights
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, default_city: impl Into<String>) -> Self {
        Self {
            backend,
            default_city: default_city.into(),
        }
    }

    /// Load weather and sights concurrently; each panel fails on its own
    pub async fn load(&self, airport: Option<&Airport>) -> ArrivalReport {
        let Some(airport) = airport else {
            return ArrivalReport::empty();
        };

        info!("Loading destination panels for {}", airport.display_name());
        let (weather, places) = tokio::join!(self.weather(airport), self.places(airport));

        ArrivalReport {
            airport: Some(airport.clone()),
            weather,
            places,
        }
    }

    async fn weather(&self, airport: &Airport) -> Panel<Weather> {
        let Some((lat, lon)) = airport.coordinates() else {
            return Panel::Unavailable(
                "Dieser Flughafen hat keine Koordinaten. Bitte prüfe airports.json.".into(),
            );
        };

        let query = WeatherQuery::Coordinates {
            lat,
            lon,
            label: airport.name.clone(),
        };
        match self.backend.weather(&query).await {
            Ok(weather) => Panel::Loaded(weather),
            Err(e) => failed(&e, "Fehler beim Laden der Wetterdaten."),
        }
    }

    async fn places(&self, airport: &Airport) -> Panel<Places> {
        let city = city_name_for_places(&airport.name, &self.default_city);
        match self.backend.places(&city).await {
            Ok(places) => Panel::Loaded(places),
            Err(e) => failed(&e, "Fehler beim Laden der Sehenswürdigkeiten."),
        }
    }
}

/// Failed panel: the backend's own text, else a generic message
///
/// A readable error body without text gets the short "Fehler beim Laden";
/// anything else (transport, unreadable body) gets `fallback`.
fn failed<T>(err: &ClientError, fallback: &str) -> Panel<T> {
    warn!("Panel request failed: {}", err);
    match err {
        ClientError::Status {
            reply: ErrorReply::Message(message),
            ..
        } => Panel::Failed(message.clone()),
        ClientError::Status {
            reply: ErrorReply::Unexplained,
            ..
        } => Panel::Failed("Fehler beim Laden".into()),
        _ => Panel::Failed(fallback.into()),
    }
}

/// Background reload of destination panels on arrival notifications
///
/// Created by [`Session::watch_arrivals`]. Notifications are debounced; the
/// last airport in a burst wins.
pub struct ArrivalWatcher {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<Debouncer<Airport>>,
}

impl ArrivalWatcher {
    /// Stop listening, run any pending reload and wait for it
    pub async fn finish(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        match (&mut self.task).await {
            Ok(debouncer) => debouncer.flush().await,
            Err(e) => warn!("Arrival watcher failed: {}", e),
        }
    }
}

impl Drop for ArrivalWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// One client session against the backend
pub struct Session {
    backend: Arc<dyn Backend>,
    directory: AirportDirectory,
    events: ArrivalEvents,
    default_city: String,
    debounce: Duration,
}

impl Session {
    /// Create a session over any backend
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            directory: AirportDirectory::new(Arc::clone(&backend)),
            backend,
            events: ArrivalEvents::default(),
            default_city: DEFAULT_CITY.to_string(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Create a session over HTTP using `config`
    pub fn connect(config: &Config) -> Result<Self, ClientError> {
        let backend = HttpBackend::new(&config.base_url, config.timeout())?;
        debug!("Using backend {}", backend.base_url());
        Ok(Self::new(Arc::new(backend))
            .with_default_city(config.default_city.clone())
            .with_debounce(config.debounce()))
    }

    /// Override the fallback city for sights
    #[must_use]
    pub fn with_default_city(mut self, city: impl Into<String>) -> Self {
        self.default_city = city.into();
        self
    }

    /// Override the panel reload delay
    #[must_use]
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    /// Backend handle
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// Airport directory
    #[must_use]
    pub fn directory(&self) -> &AirportDirectory {
        &self.directory
    }

    /// Arrival notification channel
    #[must_use]
    pub fn events(&self) -> &ArrivalEvents {
        &self.events
    }

    /// Loaded airport directory
    pub async fn airports(&self) -> Arc<Directory> {
        self.directory.ensure_loaded().await
    }

    /// Resolve free-text input against the directory
    pub async fn resolve(&self, input: &str) -> Option<Airport> {
        self.airports().await.resolve(input).cloned()
    }

    /// Search flights between two free-text airport inputs
    ///
    /// Both inputs must resolve to exactly one airport; otherwise no request
    /// is made. On success the arrival airport is published to the arrival
    /// channel.
    pub async fn search_flights(
        &self,
        departure: &str,
        arrival: &str,
    ) -> Result<FlightSearch, SearchError> {
        let directory = self.airports().await;

        let resolve = |leg: Leg, input: &str| {
            directory
                .resolve(input)
                .cloned()
                .ok_or_else(|| SearchError::Unresolved {
                    leg,
                    input: input.trim().to_string(),
                })
        };
        let dep = resolve(Leg::Departure, departure)?;
        let arr = resolve(Leg::Arrival, arrival)?;

        // Airports keyed by name alone cannot form a flights path
        for (leg, airport) in [(Leg::Departure, &dep), (Leg::Arrival, &arr)] {
            if airport.code.trim().is_empty() {
                return Err(SearchError::MissingCode {
                    leg,
                    airport: airport.display_name(),
                });
            }
        }

        info!("Searching flights {} -> {}", dep.code, arr.code);
        let flights = self
            .backend
            .flights(dep.code.trim(), arr.code.trim())
            .await?;
        info!("Found {} flights", flights.len());

        self.events.publish(arr.clone());

        Ok(FlightSearch {
            departure: dep,
            arrival: arr,
            flights,
        })
    }

    /// Destination panels using this session's backend
    #[must_use]
    pub fn panels(&self) -> ArrivalPanels {
        ArrivalPanels::new(Arc::clone(&self.backend), self.default_city.clone())
    }

    /// Reload destination panels whenever an arrival is selected
    ///
    /// `sink` receives each finished report. Must be called inside a tokio
    /// runtime.
    pub fn watch_arrivals<F>(&self, sink: F) -> ArrivalWatcher
    where
        F: Fn(ArrivalReport) + Send + Sync + 'static,
    {
        let mut rx = self.events.subscribe();
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let panels = self.panels();
        let sink = Arc::new(sink);
        let delay = self.debounce;

        let task = tokio::spawn(async move {
            let debouncer = Debouncer::new(delay, move |airport: Airport| {
                let panels = panels.clone();
                let sink = Arc::clone(&sink);
                async move {
                    let report = panels.load(Some(&airport)).await;
                    sink(report);
                }
            });

            loop {
                tokio::select! {
                    biased;
                    event = rx.next() => match event {
                        Some(event) => {
                            debug!("Arrival selected: {}", event.airport.display_name());
                            debouncer.trigger(event.airport);
                        }
                        None => break,
                    },
                    _ = &mut stop_rx => break,
                }
            }

            debouncer
        });

        ArrivalWatcher {
            stop: Some(stop_tx),
            task,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("directory", &self.directory)
            .field("default_city", &self.default_city)
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}
