mod itinerary;
mod places;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use wayfind_core::{AppConfig, Environment, GeoPoint};

#[derive(Debug, Parser)]
#[command(name = "wayfind")]
#[command(about = "Curate nearby places and turn generated itineraries into files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Curate places matching an interest near a coordinate
    Search {
        /// Interest or category, e.g. "brewery in Indiranagar"
        #[arg(long)]
        query: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Print candidates as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Reverse-geocode a coordinate to its nearest address
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Parse an itinerary document and print the structured result as JSON
    Parse {
        /// Itinerary file, or `-` for stdin
        input: PathBuf,
    },
    /// Parse an itinerary document and render it as a calendar or printable text
    Export {
        /// Itinerary file, or `-` for stdin
        input: PathBuf,
        #[arg(long, value_enum)]
        format: ExportFormat,
        /// Day the events take place (YYYY-MM-DD); defaults to tomorrow
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    /// iCalendar (.ics)
    Ics,
    /// Printable plain text
    Text,
}

/// Fallback filter directive and ANSI colouring for the log subscriber.
///
/// Without a usable config the defaults apply, so offline commands still run.
fn log_settings(config: Option<&AppConfig>) -> (&str, bool) {
    config.map_or(("info", true), |config| {
        (
            config.log_level.as_str(),
            matches!(config.env, Environment::Development),
        )
    })
}

fn init_tracing(config: Option<&AppConfig>) -> anyhow::Result<()> {
    let (log_level, ansi) = log_settings(config);
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Only the provider commands need a valid config.
    let config = wayfind_core::load_app_config();
    init_tracing(config.as_ref().ok())?;

    match cli.command {
        Commands::Search {
            query,
            lat,
            lon,
            json,
        } => places::run_search(&config?, &query, GeoPoint::new(lat, lon), json).await?,
        Commands::Locate { lat, lon } => {
            places::run_locate(&config?, GeoPoint::new(lat, lon)).await?;
        }
        Commands::Parse { input } => itinerary::run_parse(&input)?,
        Commands::Export {
            input,
            format,
            date,
            output,
        } => itinerary::run_export(&input, format, date, output.as_deref())?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
