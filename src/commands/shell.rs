// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Interactive shell - one flight search per line, destination panels in the background

use super::Output;
use crate::config::Config;
use crate::render;
use crate::session::{ArrivalReport, SearchError, Session};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Split `FROM -> TO` (or `FROM → TO`) into its two sides
#[must_use]
pub fn parse_route(line: &str) -> Option<(&str, &str)> {
    let (from, to) = line.split_once("->").or_else(|| line.split_once('→'))?;
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        None
    } else {
        Some((from, to))
    }
}

/// Destination report as text panels, or as JSON with `--json`
pub fn report_text(out: Output, report: &ArrivalReport) -> Result<String> {
    if out.json {
        serde_json::to_string_pretty(report).context("Failed to serialize destination report")
    } else {
        Ok(render::arrival_report(report, out.style))
    }
}

/// Run the interactive shell until EOF or `quit`
pub async fn run(config: &Config, out: Output) -> Result<()> {
    let session = Session::connect(config).context("Failed to set up backend client")?;
    let style = out.style;

    let watcher = session.watch_arrivals(move |report| match report_text(out, &report) {
        Ok(text) => println!("{text}"),
        Err(e) => warn!("Failed to print destination report: {}", e),
    });

    // Warm the directory so the first search does not stall on it
    let directory = session.airports().await;
    super::warn_if_no_airports(&directory, config);
    info!("Shell ready with {} airports", directory.len());
    eprintln!("Enter a route as 'FROM -> TO' (e.g. 'Zürich -> JFK'), 'quit' to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        let Some((from, to)) = parse_route(line) else {
            eprintln!("Expected 'FROM -> TO', got {line:?}");
            continue;
        };

        match session.search_flights(from, to).await {
            Ok(search) => {
                if out.json {
                    out.print_json(&search)?;
                } else {
                    out.print_text(&render::flights_table(
                        &search.departure,
                        &search.arrival,
                        &search.flights,
                        style,
                    ))?;
                }
            }
            Err(e @ (SearchError::Unresolved { .. } | SearchError::MissingCode { .. })) => {
                eprintln!("{e}");
            }
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    watcher.finish().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Style;

    #[test]
    fn test_parse_route() {
        assert_eq!(parse_route("Zürich -> JFK"), Some(("Zürich", "JFK")));
        assert_eq!(
            parse_route("Zürich (ZRH)->New York (JFK)"),
            Some(("Zürich (ZRH)", "New York (JFK)"))
        );
        assert_eq!(parse_route("ZRH → GVA"), Some(("ZRH", "GVA")));
        assert_eq!(parse_route("ZRH GVA"), None);
        assert_eq!(parse_route(" -> GVA"), None);
    }

    #[test]
    fn test_report_text_honours_json() {
        let report = ArrivalReport::empty();
        let json = Output {
            style: Style::PLAIN,
            json: true,
        };
        let value: serde_json::Value =
            serde_json::from_str(&report_text(json, &report).unwrap()).unwrap();
        assert_eq!(value["weather"]["state"], "unavailable");
        assert!(value["airport"].is_null());

        let text = Output { json: false, ..json };
        assert!(report_text(text, &report).unwrap().starts_with("Suche zuerst einen Flug"));
    }
}
