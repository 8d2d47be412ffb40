use aerogrid_core::{GeoPoint, QualityLevel, ViewBounds};
use aerogrid_engine::{
    BreakpointCatalog, NearestQuery, PredictionQuery, PredictionResponse, Scale,
};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_engine_error, ApiError, ApiResponse, AppState};

/// Scale used to colour heatmap points.
const HEATMAP_SCALE: Scale = Scale::So2Simplified;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PredictionRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    pub zoom_level: i32,
    /// Validated while deserializing; degenerate boxes reject the body.
    pub bounds: ViewBounds,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NearestParams {
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    pub zoom_level: i32,
}

#[derive(Debug, Serialize)]
pub(super) struct CenterPointItem {
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub(super) struct PredictionItem {
    latitude: f64,
    longitude: f64,
    prediction: f64,
    color: &'static str,
    quality: QualityLevel,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PredictionsData {
    center_point: CenterPointItem,
    predictions: Vec<PredictionItem>,
    average_prediction: f64,
    min_prediction: f64,
    max_prediction: f64,
}

impl PredictionsData {
    fn from_response(response: &PredictionResponse, catalog: &BreakpointCatalog) -> Self {
        let predictions = response
            .predictions
            .iter()
            .map(|point| {
                let class = catalog.classify(HEATMAP_SCALE, point.value);
                PredictionItem {
                    latitude: point.location.latitude,
                    longitude: point.location.longitude,
                    prediction: point.value,
                    color: class.color,
                    quality: class.quality,
                }
            })
            .collect();

        Self {
            center_point: CenterPointItem {
                latitude: response.center_point.location.latitude,
                longitude: response.center_point.location.longitude,
                date: response.center_point.date,
            },
            predictions,
            average_prediction: response.summary.average,
            min_prediction: response.summary.min,
            max_prediction: response.summary.max,
        }
    }
}

pub(super) async fn create_prediction(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PredictionsData>>, ApiError> {
    let Json(body) = payload
        .map_err(|rejection| ApiError::validation(req_id.0.clone(), rejection.body_text()))?;
    let center = GeoPoint::new(body.latitude, body.longitude)
        .map_err(|e| map_engine_error(req_id.0.clone(), &e.into()))?;

    let response = state
        .service
        .predict(&PredictionQuery {
            center,
            date: body.date,
            zoom_level: body.zoom_level,
            bounds: body.bounds,
        })
        .map_err(|e| map_engine_error(req_id.0.clone(), &e))?;

    let data = PredictionsData::from_response(&response, state.service.catalog());
    Ok(Json(ApiResponse::new(req_id.0, data)))
}

pub(super) async fn nearest_prediction(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<NearestParams>,
) -> Result<Json<ApiResponse<PredictionsData>>, ApiError> {
    let center = GeoPoint::new(params.latitude, params.longitude)
        .map_err(|e| map_engine_error(req_id.0.clone(), &e.into()))?;

    let response = state
        .service
        .nearest(&NearestQuery {
            center,
            date: params.date,
            zoom_level: params.zoom_level,
        })
        .map_err(|e| map_engine_error(req_id.0.clone(), &e))?;

    let data = PredictionsData::from_response(&response, state.service.catalog());
    Ok(Json(ApiResponse::new(req_id.0, data)))
}
