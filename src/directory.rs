// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Airport directory - deduplicated airport list and free-text resolution
//!
//! [`Directory`] is the immutable, deduplicated set of airports.
//! [`AirportDirectory`] owns its once-per-session load from the backend.

use crate::client::Backend;
use crate::types::{is_code, trailing_code, Airport};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Deduplicated airport list with lookup by code and name
#[derive(Debug, Clone, Default)]
pub struct Directory {
    airports: Vec<Airport>,
    by_code: HashMap<String, usize>,
}

impl Directory {
    /// Build a directory, keeping the first record per key
    ///
    /// The key is the uppercased code, or the lowercased name for records
    /// without a code. Records with neither are dropped.
    pub fn from_airports<I>(airports: I) -> Self
    where
        I: IntoIterator<Item = Airport>,
    {
        let mut seen = std::collections::HashSet::new();
        let mut directory = Self::default();

        for airport in airports {
            let Some(key) = airport.key() else {
                continue;
            };
            if !seen.insert(key) {
                debug!("Skipping duplicate airport {}", airport.display_name());
                continue;
            }

            let code = airport.code.trim().to_uppercase();
            if !code.is_empty() {
                directory.by_code.insert(code, directory.airports.len());
            }
            directory.airports.push(airport);
        }

        directory
    }

    /// Number of airports
    #[must_use]
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    /// Check if the directory is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Airports in load order
    pub fn iter(&self) -> impl Iterator<Item = &Airport> {
        self.airports.iter()
    }

    /// Case-insensitive lookup by IATA code
    #[must_use]
    pub fn by_code(&self, code: &str) -> Option<&Airport> {
        self.by_code
            .get(&code.trim().to_uppercase())
            .map(|&i| &self.airports[i])
    }

    /// Resolve free-text input to a single airport
    ///
    /// Tried in order, first hit wins:
    /// 1. trailing `(XYZ)` looked up as a code
    /// 2. bare three-character input looked up as a code, with no fallback
    /// 3. exact name, case-insensitive
    /// 4. name substring, case-insensitive, only if exactly one airport matches
    #[must_use]
    pub fn resolve(&self, input: &str) -> Option<&Airport> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(code) = trailing_code(input) {
            if let Some(airport) = self.by_code(code) {
                return Some(airport);
            }
        }

        if is_code(input) {
            return self.by_code(input);
        }

        let needle = input.to_lowercase();
        if let Some(airport) = self
            .airports
            .iter()
            .find(|a| a.name.trim().to_lowercase() == needle)
        {
            return Some(airport);
        }

        let mut matches = self
            .airports
            .iter()
            .filter(|a| a.name.to_lowercase().contains(&needle));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Airports whose name or code contains `query`, in load order
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Airport> {
        let needle = query.trim().to_lowercase();
        self.airports
            .iter()
            .filter(|a| {
                needle.is_empty()
                    || a.name.to_lowercase().contains(&needle)
                    || a.code.to_lowercase().contains(&needle)
            })
            .take(limit)
            .collect()
    }
}

/// City name to ask the places endpoint about
///
/// Strips a trailing `" (…)"` from the airport name. Empty names fall back to
/// `default_city`.
#[must_use]
pub fn city_name_for_places(airport_name: &str, default_city: &str) -> String {
    let name = airport_name.trim();
    if name.is_empty() {
        return default_city.to_string();
    }

    let stripped = match (name.ends_with(')'), name.rfind('(')) {
        (true, Some(open)) => name[..open].trim_end(),
        _ => name,
    };

    if stripped.is_empty() {
        default_city.to_string()
    } else {
        stripped.to_string()
    }
}

/// Session-scoped airport directory, loaded at most once
///
/// The first [`ensure_loaded`](Self::ensure_loaded) fetches the airport list;
/// concurrent callers wait on that same fetch and later callers get the
/// cached result. A failed fetch yields an empty directory for the rest of
/// the session.
pub struct AirportDirectory {
    backend: Arc<dyn Backend>,
    loaded: OnceCell<Arc<Directory>>,
}

impl AirportDirectory {
    /// Create an unloaded directory backed by `backend`
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            loaded: OnceCell::new(),
        }
    }

    /// Load the directory if needed and return it
    pub async fn ensure_loaded(&self) -> Arc<Directory> {
        self.loaded
            .get_or_init(|| async {
                match self.backend.airports().await {
                    Ok(airports) => {
                        let total = airports.len();
                        let directory = Directory::from_airports(airports);
                        info!("Loaded {} airports ({} in list)", directory.len(), total);
                        Arc::new(directory)
                    }
                    Err(e) => {
                        warn!("Failed to load airports, continuing without: {}", e);
                        Arc::new(Directory::default())
                    }
                }
            })
            .await
            .clone()
    }

    /// The directory, if loading has finished
    #[must_use]
    pub fn get(&self) -> Option<Arc<Directory>> {
        self.loaded.get().cloned()
    }

    /// Check if loading has finished
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.loaded.initialized()
    }
}

impl std::fmt::Debug for AirportDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirportDirectory")
            .field("loaded", &self.loaded.get().map(|d| d.len()))
            .finish_non_exhaustive()
    }
}
