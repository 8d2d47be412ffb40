//! Command handlers. Each returns the JSON document `main` prints.

use aerogrid_core::{GeoPoint, ViewBounds};
use aerogrid_engine::alerts;
use aerogrid_engine::aqi::{composite, PollutantReadings};
use aerogrid_engine::{
    BreakpointCatalog, NearestQuery, PredictionQuery, PredictionService, RngVariation, Scale,
    ServiceConfig, VariationSource, ZoomTier,
};
use serde_json::{json, Value};

use crate::Location;

fn build_service(seed: Option<u64>) -> PredictionService {
    tracing::debug!(?seed, "building prediction service");
    let variation: Box<dyn VariationSource> = match seed {
        Some(seed) => Box::new(RngVariation::seeded(seed)),
        None => Box::new(RngVariation::from_os_rng()),
    };
    PredictionService::new(
        ServiceConfig::default(),
        BreakpointCatalog::standard(),
        variation,
    )
}

pub(crate) fn predict(
    location: &Location,
    north: f64,
    south: f64,
    east: f64,
    west: f64,
) -> anyhow::Result<Value> {
    let center = GeoPoint::new(location.lat, location.lon)?;
    let bounds = ViewBounds::new(north, south, east, west)?;
    tracing::info!(
        zoom = location.zoom,
        tier = ?ZoomTier::from_zoom(location.zoom),
        seed = ?location.seed,
        "predicting viewport"
    );
    let response = build_service(location.seed).predict(&PredictionQuery {
        center,
        date: location.date,
        zoom_level: location.zoom,
        bounds,
    })?;
    Ok(serde_json::to_value(&*response)?)
}

pub(crate) fn nearest(location: &Location) -> anyhow::Result<Value> {
    let center = GeoPoint::new(location.lat, location.lon)?;
    tracing::info!(
        zoom = location.zoom,
        tier = ?ZoomTier::from_zoom(location.zoom),
        seed = ?location.seed,
        "predicting around location"
    );
    let response = build_service(location.seed).nearest(&NearestQuery {
        center,
        date: location.date,
        zoom_level: location.zoom,
    })?;
    Ok(serde_json::to_value(&*response)?)
}

pub(crate) fn classify(scale: Scale, value: f64) -> Value {
    let class = BreakpointCatalog::standard().classify(scale, value);
    json!({
        "scale": scale,
        "value": value,
        "color": class.color,
        "quality": class.quality,
        "label": class.quality.label(),
    })
}

pub(crate) fn aqi(readings: PollutantReadings) -> anyhow::Result<Value> {
    let Some(report) = composite(&readings, &BreakpointCatalog::standard()) else {
        anyhow::bail!("pass at least one pollutant, e.g. --pm25 12.5");
    };
    tracing::debug!(aqi = report.aqi, dominant = %report.dominant, "composite aqi");
    Ok(json!({
        "aqi": report.aqi,
        "dominant": report.dominant,
        "quality": report.quality,
        "color": report.quality.color(),
        "label": report.quality.label(),
        "alerts": alerts::evaluate(report.aqi),
    }))
}

pub(crate) fn legend(scale: Scale) -> Value {
    json!({
        "scale": scale,
        "unit": scale.unit(),
        "entries": BreakpointCatalog::standard().legend(scale),
    })
}
