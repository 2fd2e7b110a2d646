//! profinder - find service professionals near a place
//!
//! Radius search over the professional directory, plus the geocoding and
//! distance helpers it is built on.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use profinder_cli::OutputFormat;
use profinder_core::error::exit_codes;
use profinder_core::ErrorCode;
use std::process::ExitCode;

mod commands;
mod context;
mod render;

use commands::{categories, distance, geocode, locate, recent, search};
use context::Context;

/// Find service professionals near an address or your current location
#[derive(Parser)]
#[command(name = "profinder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Path to profinder.toml
    #[arg(short, long, global = true, env = "PROFINDER_CONFIG")]
    config: Option<String>,

    /// Print collected metrics to stderr on exit
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Great-circle distance between two points
    Distance {
        /// Latitude of the first point
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        /// Longitude of the first point
        #[arg(allow_negative_numbers = true)]
        lng1: f64,
        /// Latitude of the second point
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        /// Longitude of the second point
        #[arg(allow_negative_numbers = true)]
        lng2: f64,
    },

    /// Format a distance in kilometers for display
    Format {
        /// Distance in kilometers
        #[arg(allow_negative_numbers = true)]
        km: f64,
    },

    /// Resolve an address to coordinates
    Geocode {
        /// Free-text address
        #[arg(required = true, num_args = 1..)]
        address: Vec<String>,
    },

    /// Look up a label for coordinates
    Reverse {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lng: f64,
    },

    /// Show the current position
    Locate,

    /// List service categories
    Categories,

    /// List professionals of one category
    Browse {
        /// Category identifier
        category: String,

        /// Latitude to measure distances from
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude to measure distances from
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
    },

    /// List the newest professionals
    Recent {
        /// How many to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Latitude to measure distances from
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude to measure distances from
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
    },

    /// Search for professionals around a point
    Search(search::SearchArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let ctx = match Context::load(cli.config.as_deref(), cli.format) {
        Ok(ctx) => ctx,
        Err(e) => return report(&e, cli.format),
    };

    if let Err(e) = ctx.init_logging(cli.verbose) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let result = match cli.command {
        Commands::Distance { lat1, lng1, lat2, lng2 } => distance::run_distance(&ctx, lat1, lng1, lat2, lng2),
        Commands::Format { km } => distance::run_format(&ctx, km),
        Commands::Geocode { address } => geocode::run_forward(&ctx, &address.join(" ")).await,
        Commands::Reverse { lat, lng } => geocode::run_reverse(&ctx, lat, lng).await,
        Commands::Locate => locate::run(&ctx).await,
        Commands::Categories => categories::run_list(&ctx).await,
        Commands::Browse { category, lat, lng } => categories::run_browse(&ctx, &category, lat.zip(lng)).await,
        Commands::Recent { limit, lat, lng } => recent::run(&ctx, limit, lat.zip(lng)).await,
        Commands::Search(args) => search::run(&ctx, args).await,
    };

    if cli.metrics {
        match serde_json::to_string_pretty(&profinder_telemetry::metrics().export_json()) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => eprintln!("{} {}", "Warning:".yellow().bold(), e),
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e, cli.format),
    }
}

/// Print an error with its code and pick the exit status.
///
/// In JSON mode the error goes to stderr as a serialized report.
fn report(err: &anyhow::Error, format: OutputFormat) -> ExitCode {
    let code = error_code(err);

    if format.is_json() {
        let report = match err.downcast_ref::<profinder_core::Error>() {
            Some(e) => e.to_report(),
            None => profinder_core::Error::new(code.unwrap_or(ErrorCode::Unknown), format!("{err:#}")).to_report(),
        };
        if let Ok(json) = serde_json::to_string_pretty(&report) {
            eprintln!("{json}");
            return ExitCode::from(exit_status(code));
        }
    }

    match code {
        // Coded core errors render their own code
        Some(code) if err.downcast_ref::<profinder_core::Error>().is_none() => {
            eprintln!("{} [{}] {}", "Error:".red().bold(), code, err);
        }
        _ => eprintln!("{} {:#}", "Error:".red().bold(), err),
    }
    ExitCode::from(exit_status(code))
}

fn error_code(err: &anyhow::Error) -> Option<ErrorCode> {
    if let Some(e) = err.downcast_ref::<profinder_search::SearchError>() {
        Some(e.code())
    } else if let Some(e) = err.downcast_ref::<profinder_api_client::ApiError>() {
        Some(e.code())
    } else if let Some(e) = err.downcast_ref::<profinder_geo::GeoError>() {
        Some(match e {
            profinder_geo::GeoError::InvalidCoordinate(_) => ErrorCode::InvalidCoordinate,
            profinder_geo::GeoError::InvalidRadius(_) => ErrorCode::InvalidRadius,
        })
    } else {
        err.downcast_ref::<profinder_core::Error>().map(|e| e.code)
    }
}

fn exit_status(code: Option<ErrorCode>) -> u8 {
    let status = match code {
        Some(
            ErrorCode::InvalidCoordinate | ErrorCode::InvalidRadius | ErrorCode::InvalidQuery | ErrorCode::AddressEmpty,
        ) => exit_codes::VALIDATION_ERROR,
        Some(c) if c.category() == "Configuration" => exit_codes::CONFIG_ERROR,
        Some(ErrorCode::AddressNotFound) => exit_codes::NOT_FOUND,
        Some(ErrorCode::Timeout | ErrorCode::LocationTimeout) => exit_codes::TIMEOUT,
        _ => exit_codes::FAILURE,
    };
    u8::try_from(status).unwrap_or(1)
}
