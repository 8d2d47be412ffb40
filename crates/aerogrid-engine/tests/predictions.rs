use std::sync::Arc;

use aerogrid_core::{GeoPoint, QualityLevel, ViewBounds};
use aerogrid_engine::aqi::{composite, PollutantReadings};
use aerogrid_engine::{
    BreakpointCatalog, NearestQuery, PredictionQuery, PredictionService, RngVariation, Scale,
    ServiceConfig,
};
use chrono::NaiveDate;

fn service() -> PredictionService {
    PredictionService::new(
        ServiceConfig::default(),
        BreakpointCatalog::standard(),
        Box::new(RngVariation::seeded(2024)),
    )
}

fn washington() -> GeoPoint {
    GeoPoint::new(38.9, -77.0).unwrap()
}

fn friday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

#[test]
fn viewport_prediction_end_to_end() {
    let svc = service();
    let bounds = ViewBounds::new(39.0, 38.8, -76.9, -77.1).unwrap();
    let response = svc
        .predict(&PredictionQuery {
            center: washington(),
            date: friday(),
            zoom_level: 14,
            bounds,
        })
        .unwrap();

    assert_eq!(response.predictions.len(), 9);
    assert!(response.summary.min <= response.summary.average);
    assert!(response.summary.average <= response.summary.max);

    for point in &response.predictions {
        assert!(bounds.contains(point.location));
        let class = svc.classify(Scale::So2Simplified, point.value);
        // estimates never exceed 30 ppb, so the top two tiers are unreachable
        assert!(class.quality <= QualityLevel::UnhealthyForSensitiveGroups);
    }
}

#[test]
fn repeated_center_returns_cached_response_across_paths() {
    let svc = service();
    let wide = ViewBounds::new(39.2, 38.6, -76.7, -77.3).unwrap();
    let narrow = ViewBounds::new(38.92, 38.88, -76.98, -77.02).unwrap();

    let first = svc
        .predict(&PredictionQuery {
            center: washington(),
            date: friday(),
            zoom_level: 11,
            bounds: wide,
        })
        .unwrap();
    let second = svc
        .predict(&PredictionQuery {
            center: washington(),
            date: friday(),
            zoom_level: 16,
            bounds: narrow,
        })
        .unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let nearest = svc
        .nearest(&NearestQuery {
            center: washington(),
            date: friday(),
            zoom_level: 16,
        })
        .unwrap();
    let nearest_again = svc
        .nearest(&NearestQuery {
            center: washington(),
            date: friday(),
            zoom_level: 3,
        })
        .unwrap();
    assert!(Arc::ptr_eq(&nearest, &nearest_again));
    assert_eq!(svc.cache_len(), 2);
}

#[test]
fn composite_aqi_uses_catalog_palette() {
    let catalog = BreakpointCatalog::standard();
    let readings = PollutantReadings {
        pm25: Some(40.0),
        no2: Some(20.0),
        ..PollutantReadings::default()
    };
    let report = composite(&readings, &catalog).unwrap();
    assert_eq!(report.quality, QualityLevel::UnhealthyForSensitiveGroups);
    assert_eq!(
        catalog.classify(Scale::Aqi, f64::from(report.aqi)).color,
        "#ff7e00"
    );
}
