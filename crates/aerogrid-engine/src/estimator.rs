//! Placeholder pollutant estimator.
//!
//! `value = base + weekday nudge + ln(area) * weight + uniform noise`,
//! clamped to a plausible range. This is a heuristic stand-in for a real
//! model and is kept exactly as the dashboard has always rendered it.

use aerogrid_core::GeoPoint;
use chrono::{Datelike, NaiveDate};

use crate::variation::VariationSource;

/// Constants of the heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorModel {
    pub base_value: f64,
    /// Scaled by `days_since_sunday / 7`.
    pub weekly_amplitude: f64,
    /// Multiplier on `ln(area_km2)`.
    pub area_weight: f64,
    /// Width of the uniform noise band `[0, span)`.
    pub variation_span: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl EstimatorModel {
    /// SO₂ placeholder in ppb.
    #[must_use]
    pub fn so2_placeholder() -> Self {
        Self {
            base_value: 15.0,
            weekly_amplitude: 5.0,
            area_weight: 2.0,
            variation_span: 5.0,
            floor: 5.0,
            ceiling: 30.0,
        }
    }
}

impl Default for EstimatorModel {
    fn default() -> Self {
        Self::so2_placeholder()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Estimator {
    model: EstimatorModel,
}

impl Estimator {
    #[must_use]
    pub fn new(model: EstimatorModel) -> Self {
        Self { model }
    }

    #[must_use]
    pub fn model(&self) -> &EstimatorModel {
        &self.model
    }

    /// Weekly nudge: `(weekday / 7) * amplitude` with Sunday = 0.
    #[must_use]
    pub fn date_effect(&self, date: NaiveDate) -> f64 {
        f64::from(date.weekday().num_days_from_sunday()) / 7.0 * self.model.weekly_amplitude
    }

    /// `ln(area) * weight`; zero for non-positive or non-finite areas.
    #[must_use]
    pub fn area_effect(&self, area_km2: f64) -> f64 {
        if area_km2 > 0.0 && area_km2.is_finite() {
            area_km2.ln() * self.model.area_weight
        } else {
            0.0
        }
    }

    /// Deterministic part of the estimate, before noise and clamping.
    #[must_use]
    pub fn baseline(&self, date: NaiveDate, area_km2: f64) -> f64 {
        self.model.base_value + self.date_effect(date) + self.area_effect(area_km2)
    }

    /// Estimate the concentration at `point`.
    ///
    /// The location does not currently influence the value; it is part of the
    /// signature so a spatial model can slot in without changing callers.
    pub fn estimate(
        &self,
        _point: GeoPoint,
        date: NaiveDate,
        area_km2: f64,
        variation: &mut dyn VariationSource,
    ) -> f64 {
        let noise = variation.unit() * self.model.variation_span;
        (self.baseline(date, area_km2) + noise).clamp(self.model.floor, self.model.ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variation::{FixedVariation, RngVariation};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    const ORIGIN: GeoPoint = GeoPoint {
        latitude: 38.9,
        longitude: -77.0,
    };

    #[test]
    fn date_effect_uses_sunday_based_weekday() {
        let estimator = Estimator::default();
        // 2024-03-17 is a Sunday, 2024-03-15 a Friday, 2024-03-16 a Saturday
        assert_eq!(estimator.date_effect(date("2024-03-17")), 0.0);
        assert!((estimator.date_effect(date("2024-03-15")) - 5.0 / 7.0 * 5.0).abs() < 1e-12);
        assert!((estimator.date_effect(date("2024-03-16")) - 6.0 / 7.0 * 5.0).abs() < 1e-12);
    }

    #[test]
    fn area_effect_guards_non_positive_area() {
        let estimator = Estimator::default();
        assert_eq!(estimator.area_effect(0.0), 0.0);
        assert_eq!(estimator.area_effect(-4.0), 0.0);
        assert_eq!(estimator.area_effect(f64::NAN), 0.0);
        assert_eq!(estimator.area_effect(1.0), 0.0);
        assert!((estimator.area_effect(100.0) - 100f64.ln() * 2.0).abs() < 1e-12);
    }

    #[test]
    fn baseline_is_exact() {
        let estimator = Estimator::default();
        let expected = 15.0 + 5.0 / 7.0 * 5.0 + 2.0 * 384.0f64.ln();
        assert!((estimator.baseline(date("2024-03-15"), 384.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn fixed_noise_adds_span_fraction() {
        let estimator = Estimator::default();
        let day = date("2024-03-17");
        // Sunday, area 1 km²: baseline is exactly the base value
        let low = estimator.estimate(ORIGIN, day, 1.0, &mut FixedVariation(0.0));
        let mid = estimator.estimate(ORIGIN, day, 1.0, &mut FixedVariation(0.5));
        assert_eq!(low, 15.0);
        assert_eq!(mid, 17.5);
    }

    #[test]
    fn output_clamps_to_ceiling_for_huge_areas() {
        let estimator = Estimator::default();
        let v = estimator.estimate(ORIGIN, date("2024-03-16"), 1e9, &mut FixedVariation(0.9));
        assert_eq!(v, 30.0);
    }

    #[test]
    fn output_clamps_to_floor_for_tiny_areas() {
        let estimator = Estimator::default();
        let v = estimator.estimate(ORIGIN, date("2024-03-17"), 1e-4, &mut FixedVariation(0.0));
        assert_eq!(v, 5.0);
    }

    #[test]
    fn estimate_stays_in_range_over_many_trials() {
        let estimator = Estimator::default();
        let mut variation = RngVariation::seeded(2024);
        let start = date("2024-01-01");
        let areas = [0.0, 1e-6, 0.5, 1.0, 42.0, 384.0, 1e4, 1e7, 1e12];

        for trial in 0..10_000u32 {
            let day = start + chrono::Days::new(u64::from(trial % 366));
            let area = areas[trial as usize % areas.len()] * f64::from(1 + trial % 3);
            let v = estimator.estimate(ORIGIN, day, area, &mut variation);
            assert!((5.0..=30.0).contains(&v), "trial {trial}: {v} out of range");
        }
    }

    #[test]
    fn noise_stays_within_span_when_unclamped() {
        let estimator = Estimator::default();
        let day = date("2024-03-17");
        let mut variation = RngVariation::seeded(99);
        for _ in 0..500 {
            let v = estimator.estimate(ORIGIN, day, 1.0, &mut variation);
            assert!((15.0..20.0).contains(&v), "got {v}");
        }
    }
}
