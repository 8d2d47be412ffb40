//! Shared domain types and configuration for aerogrid.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod quality;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{GeoPoint, ViewBounds};
pub use quality::{Pollutant, QualityLevel};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("degenerate bounds: {reason}")]
    DegenerateBounds { reason: String },

    #[error("unknown pollutant: {0}")]
    UnknownPollutant(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
