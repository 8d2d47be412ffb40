//! Prediction-grid engine for the air-quality map.
//!
//! Turns a map viewport and a date into a set of sample points with
//! estimated pollutant values, summarises them, and classifies values
//! against health-standard breakpoint tables for rendering.

pub mod alerts;
pub mod aqi;
pub mod assemble;
pub mod cache;
pub mod classify;
pub mod error;
pub mod estimator;
pub mod geo;
pub mod grid;
pub mod service;
pub mod types;
pub mod variation;

pub use alerts::{Alert, AlertLevel, AlertRule, Stakeholder};
pub use assemble::assemble;
pub use cache::{CacheKey, PredictionCache, QueryKind};
pub use classify::{BreakpointCatalog, BreakpointTable, Classification, Scale};
pub use error::EngineError;
pub use estimator::{Estimator, EstimatorModel};
pub use grid::{circle_around, generate_grid, ZoomTier};
pub use service::{PredictionService, ServiceConfig};
pub use types::{
    CenterPoint, NearestQuery, PredictionPoint, PredictionQuery, PredictionResponse,
    PredictionSummary,
};
pub use variation::{FixedVariation, RngVariation, VariationSource};
