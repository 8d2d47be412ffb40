use aerogrid_core::{Pollutant, QualityLevel};
use aerogrid_engine::alerts::{self, Alert};
use aerogrid_engine::aqi::{composite, PollutantReadings};
use aerogrid_engine::classify::LegendEntry;
use aerogrid_engine::Scale;
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ClassifyParams {
    pub scale: String,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct ClassificationItem {
    scale: Scale,
    value: f64,
    color: &'static str,
    quality: QualityLevel,
    label: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct LegendData {
    scale: Scale,
    unit: &'static str,
    entries: Vec<LegendEntry>,
}

#[derive(Debug, Serialize)]
pub(super) struct AqiItem {
    aqi: u32,
    dominant: Pollutant,
    quality: QualityLevel,
    color: &'static str,
    label: &'static str,
    alerts: Vec<Alert>,
}

pub(super) async fn classify_value(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<ClassifyParams>,
) -> Result<Json<ApiResponse<ClassificationItem>>, ApiError> {
    let scale = params
        .scale
        .parse::<Scale>()
        .map_err(|e| ApiError::validation(req_id.0.clone(), e.to_string()))?;
    if !params.value.is_finite() {
        return Err(ApiError::validation(
            req_id.0,
            "value must be a finite number",
        ));
    }

    let class = state.service.classify(scale, params.value);
    Ok(Json(ApiResponse::new(
        req_id.0,
        ClassificationItem {
            scale,
            value: params.value,
            color: class.color,
            quality: class.quality,
            label: class.quality.label(),
        },
    )))
}

pub(super) async fn legend(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(scale): Path<String>,
) -> Result<Json<ApiResponse<LegendData>>, ApiError> {
    let Ok(scale) = scale.parse::<Scale>() else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("no breakpoint table named {scale}"),
        ));
    };

    Ok(Json(ApiResponse::new(
        req_id.0,
        LegendData {
            scale,
            unit: scale.unit(),
            entries: state.service.catalog().legend(scale),
        },
    )))
}

pub(super) async fn composite_aqi(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(readings): Json<PollutantReadings>,
) -> Result<Json<ApiResponse<AqiItem>>, ApiError> {
    let Some(report) = composite(&readings, state.service.catalog()) else {
        return Err(ApiError::validation(
            req_id.0,
            "at least one pollutant concentration is required",
        ));
    };

    Ok(Json(ApiResponse::new(
        req_id.0,
        AqiItem {
            aqi: report.aqi,
            dominant: report.dominant,
            quality: report.quality,
            color: report.quality.color(),
            label: report.quality.label(),
            alerts: alerts::evaluate(report.aqi),
        },
    )))
}
