mod commands;

use aerogrid_engine::Scale;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "aerogrid-cli")]
#[command(about = "Air-quality prediction grid from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Center, date and zoom shared by the prediction commands.
#[derive(Debug, Args)]
struct Location {
    /// Center latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    /// Center longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,
    /// Day to predict for (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,
    /// Map zoom level
    #[arg(long, default_value_t = 12)]
    zoom: i32,
    /// Seed for reproducible output
    #[arg(long, env = "AEROGRID_RNG_SEED")]
    seed: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Predict over a viewport
    Predict {
        #[command(flatten)]
        location: Location,
        #[arg(long, allow_negative_numbers = true)]
        north: f64,
        #[arg(long, allow_negative_numbers = true)]
        south: f64,
        #[arg(long, allow_negative_numbers = true)]
        east: f64,
        #[arg(long, allow_negative_numbers = true)]
        west: f64,
    },
    /// Predict on a circle around a single location
    Nearest {
        #[command(flatten)]
        location: Location,
    },
    /// Classify a value against a breakpoint table
    Classify {
        /// Table name, e.g. aqi, pm25, so2_simplified
        #[arg(long)]
        scale: Scale,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Composite AQI from pollutant concentrations
    Aqi {
        /// PM2.5 in µg/m³
        #[arg(long)]
        pm25: Option<f64>,
        /// PM10 in µg/m³
        #[arg(long)]
        pm10: Option<f64>,
        /// Ozone in ppb
        #[arg(long)]
        o3: Option<f64>,
        /// Nitrogen dioxide in ppb
        #[arg(long)]
        no2: Option<f64>,
        /// Carbon monoxide in ppm
        #[arg(long)]
        co: Option<f64>,
        /// Sulfur dioxide in ppb
        #[arg(long)]
        so2: Option<f64>,
    },
    /// Print the legend for a breakpoint table
    Legend {
        #[arg(long)]
        scale: Scale,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = match cli.command {
        Commands::Predict {
            location,
            north,
            south,
            east,
            west,
        } => commands::predict(&location, north, south, east, west)?,
        Commands::Nearest { location } => commands::nearest(&location)?,
        Commands::Classify { scale, value } => commands::classify(scale, value),
        Commands::Aqi {
            pm25,
            pm10,
            o3,
            no2,
            co,
            so2,
        } => commands::aqi(aerogrid_engine::aqi::PollutantReadings {
            pm25,
            pm10,
            o3,
            no2,
            co,
            so2,
        })?,
        Commands::Legend { scale } => commands::legend(scale),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
