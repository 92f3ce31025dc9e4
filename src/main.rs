// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Flight Basar CLI - flight search with destination weather and sights

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use flight_basar::commands::{self, Output};
use flight_basar::config;
use flight_basar::render::Style;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flight-basar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "FLIGHT_BASAR_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Backend base URL override
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", global = true)]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List or search known airports
    Airports {
        /// Name or code fragment (lists all when omitted)
        query: Option<String>,

        /// Maximum number of airports to show
        #[arg(short, long, default_value_t = 25)]
        limit: usize,
    },

    /// Resolve free text (city, "Name (CODE)" or code) to one airport
    Resolve {
        /// Airport input
        input: String,
    },

    /// Search flights and show weather and sights at the destination
    Search {
        /// Departure airport
        from: String,

        /// Arrival airport
        to: String,

        /// Skip the destination weather and sights
        #[arg(long)]
        no_panels: bool,
    },

    /// Show current weather and forecast
    Weather {
        /// Airport to look up by coordinates
        #[arg(required_unless_present = "city")]
        airport: Option<String>,

        /// Use the backend's city table instead of an airport
        #[arg(long, conflicts_with = "airport")]
        city: Option<String>,
    },

    /// Show sights around a city
    Places {
        /// City name (configured default city when omitted)
        city: Option<String>,
    },

    /// Show the backend server time
    Time,

    /// Interactive search, one 'FROM -> TO' per line
    Shell,

    /// Print the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => config.log_level.parse().unwrap_or(tracing::Level::INFO),
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let out = Output {
        style: Style { color: !cli.no_color },
        json: cli.json,
    };

    // Execute command
    match cli.command {
        Commands::Airports { query, limit } => {
            commands::airports::run(&config, out, query, limit).await
        }
        Commands::Resolve { input } => {
            commands::resolve::run(&config, out, &input).await
        }
        Commands::Search { from, to, no_panels } => {
            commands::search::run(&config, out, &from, &to, no_panels).await
        }
        Commands::Weather { airport, city } => {
            commands::weather::run(&config, out, airport, city).await
        }
        Commands::Places { city } => {
            commands::places::run(&config, out, city).await
        }
        Commands::Time => {
            commands::time::run(&config, out).await
        }
        Commands::Shell => {
            commands::shell::run(&config, out).await
        }
        Commands::Config => {
            commands::config::run(&config, out)
        }
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    }
}
