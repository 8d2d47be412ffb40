use aerogrid_core::GeoPoint;
use chrono::NaiveDate;

use crate::error::EngineError;
use crate::types::{CenterPoint, PredictionPoint, PredictionResponse, PredictionSummary};

/// Package per-point predictions with their average, minimum and maximum.
///
/// # Errors
///
/// Returns [`EngineError::EmptyPrediction`] when `points` is empty, since no
/// meaningful summary exists.
pub fn assemble(
    center: GeoPoint,
    date: NaiveDate,
    points: Vec<PredictionPoint>,
) -> Result<PredictionResponse, EngineError> {
    if points.is_empty() {
        return Err(EngineError::EmptyPrediction);
    }

    let (sum, min, max) = points.iter().fold(
        (0.0, f64::INFINITY, f64::NEG_INFINITY),
        |(sum, min, max), p| (sum + p.value, min.min(p.value), max.max(p.value)),
    );
    #[allow(clippy::cast_precision_loss)]
    let average = sum / points.len() as f64;

    Ok(PredictionResponse {
        center_point: CenterPoint {
            location: center,
            date,
        },
        predictions: points,
        summary: PredictionSummary { average, min, max },
    })
}
