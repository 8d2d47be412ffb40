use aerogrid_core::{GeoPoint, ViewBounds};
use chrono::NaiveDate;
use serde::Serialize;

/// A sampled location and its estimated concentration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionPoint {
    pub location: GeoPoint,
    pub value: f64,
}

/// Viewport-driven prediction request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionQuery {
    pub center: GeoPoint,
    pub date: NaiveDate,
    pub zoom_level: i32,
    pub bounds: ViewBounds,
}

/// Single-location request answered by sampling a circle around `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestQuery {
    pub center: GeoPoint,
    pub date: NaiveDate,
    pub zoom_level: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CenterPoint {
    pub location: GeoPoint,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionSummary {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResponse {
    pub center_point: CenterPoint,
    pub predictions: Vec<PredictionPoint>,
    pub summary: PredictionSummary,
}
