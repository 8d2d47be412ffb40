//! The prediction pipeline behind both the HTTP API and the CLI.
//!
//! One `PredictionService` is built at startup and shared behind an `Arc`.
//! Breakpoint tables and the variation source are injected, so tests can
//! pin both.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use aerogrid_core::{AppConfig, GeoPoint};
use chrono::NaiveDate;

use crate::assemble::assemble;
use crate::cache::{
    CacheKey, PredictionCache, QueryKind, DEFAULT_CAPACITY, DEFAULT_COORD_DECIMALS,
};
use crate::classify::{BreakpointCatalog, Classification, Scale};
use crate::error::EngineError;
use crate::estimator::{Estimator, EstimatorModel};
use crate::geo::area_km2;
use crate::grid::{circle_around, generate_grid, ZoomTier, CIRCLE_POINT_COUNT};
use crate::types::{NearestQuery, PredictionPoint, PredictionQuery, PredictionResponse};
use crate::variation::VariationSource;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceConfig {
    pub cache_capacity: usize,
    pub cache_coord_decimals: u32,
    pub model: EstimatorModel,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            cache_coord_decimals: DEFAULT_COORD_DECIMALS,
            model: EstimatorModel::default(),
        }
    }
}

impl From<&AppConfig> for ServiceConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            cache_capacity: config.cache_capacity,
            cache_coord_decimals: config.cache_coord_decimals,
            model: EstimatorModel::default(),
        }
    }
}

pub struct PredictionService {
    config: ServiceConfig,
    catalog: BreakpointCatalog,
    estimator: Estimator,
    cache: Mutex<PredictionCache>,
    variation: Mutex<Box<dyn VariationSource>>,
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("config", &self.config)
            .field("cached_responses", &self.cache_len())
            .finish_non_exhaustive()
    }
}

/// Recover the guard from a poisoned lock.
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PredictionService {
    #[must_use]
    pub fn new(
        config: ServiceConfig,
        catalog: BreakpointCatalog,
        variation: Box<dyn VariationSource>,
    ) -> Self {
        Self {
            config,
            catalog,
            estimator: Estimator::new(config.model),
            cache: Mutex::new(PredictionCache::new(config.cache_capacity)),
            variation: Mutex::new(variation),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &BreakpointCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn classify(&self, scale: Scale, value: f64) -> Classification {
        self.catalog.classify(scale, value)
    }

    #[must_use]
    pub fn cache_len(&self) -> usize {
        lock(&self.cache).len()
    }

    /// Predictions for a map viewport.
    ///
    /// Responses are cached by rounded center and date only, so a repeated
    /// center returns the earlier response even if bounds or zoom changed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Geometry`] for an out-of-range center.
    pub fn predict(&self, query: &PredictionQuery) -> Result<Arc<PredictionResponse>, EngineError> {
        let center = GeoPoint::new(query.center.latitude, query.center.longitude)?;
        let key = self.key(QueryKind::Viewport, center, query.date);
        if let Some(hit) = lock(&self.cache).get(&key) {
            return Ok(hit);
        }

        let tier = ZoomTier::from_zoom(query.zoom_level);
        let points = generate_grid(&query.bounds, tier.grid_points());
        let area = area_km2(&query.bounds);

        tracing::info!(
            zoom = query.zoom_level,
            ?tier,
            points = points.len(),
            area_km2 = area,
            date = %query.date,
            "computing viewport prediction"
        );

        self.compute_and_store(key, center, query.date, points, area)
    }

    /// Predictions sampled on a circle around a single location.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Geometry`] for an out-of-range center.
    pub fn nearest(&self, query: &NearestQuery) -> Result<Arc<PredictionResponse>, EngineError> {
        let center = GeoPoint::new(query.center.latitude, query.center.longitude)?;
        let key = self.key(QueryKind::Nearest, center, query.date);
        if let Some(hit) = lock(&self.cache).get(&key) {
            return Ok(hit);
        }

        let tier = ZoomTier::from_zoom(query.zoom_level);
        let radius_km = tier.circle_radius_km();
        let points = circle_around(center, radius_km, CIRCLE_POINT_COUNT);
        // bounding square of the sampling circle
        let area = (2.0 * radius_km).powi(2);

        tracing::info!(
            zoom = query.zoom_level,
            ?tier,
            radius_km,
            date = %query.date,
            "computing nearest prediction"
        );

        self.compute_and_store(key, center, query.date, points, area)
    }

    fn key(&self, kind: QueryKind, center: GeoPoint, date: NaiveDate) -> CacheKey {
        CacheKey::new(kind, center, date, self.config.cache_coord_decimals)
    }

    fn compute_and_store(
        &self,
        key: CacheKey,
        center: GeoPoint,
        date: NaiveDate,
        locations: Vec<GeoPoint>,
        area: f64,
    ) -> Result<Arc<PredictionResponse>, EngineError> {
        let points = {
            let mut variation = lock(&self.variation);
            locations
                .into_iter()
                .map(|location| PredictionPoint {
                    location,
                    value: self
                        .estimator
                        .estimate(location, date, area, variation.as_mut()),
                })
                .collect::<Vec<_>>()
        };

        let response = Arc::new(assemble(center, date, points)?);
        lock(&self.cache).put(key, Arc::clone(&response));
        Ok(response)
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
