//! Composite AQI from individual pollutant concentrations.
//!
//! Each pollutant is converted to a sub-index by piecewise-linear
//! interpolation inside its EPA concentration band; the composite is the
//! highest sub-index.

use aerogrid_core::{Pollutant, QualityLevel};
use serde::{Deserialize, Serialize};

use crate::classify::{BreakpointCatalog, Scale};

/// Highest reportable index.
pub const AQI_CEILING: f64 = 500.0;

/// `(c_lo, c_hi, i_lo, i_hi)` interpolation band.
type Band = (f64, f64, f64, f64);

const PM25_BANDS: [Band; 6] = [
    (0.0, 12.0, 0.0, 50.0),
    (12.1, 35.4, 51.0, 100.0),
    (35.5, 55.4, 101.0, 150.0),
    (55.5, 150.4, 151.0, 200.0),
    (150.5, 250.4, 201.0, 300.0),
    (250.5, 500.0, 301.0, 500.0),
];

const PM10_BANDS: [Band; 6] = [
    (0.0, 54.0, 0.0, 50.0),
    (55.0, 154.0, 51.0, 100.0),
    (155.0, 254.0, 101.0, 150.0),
    (255.0, 354.0, 151.0, 200.0),
    (355.0, 424.0, 201.0, 300.0),
    (425.0, 604.0, 301.0, 500.0),
];

/// Ozone has no interpolated Hazardous band; see [`O3_HAZARDOUS`].
const O3_BANDS: [Band; 5] = [
    (0.0, 54.0, 0.0, 50.0),
    (55.0, 70.0, 51.0, 100.0),
    (71.0, 85.0, 101.0, 150.0),
    (86.0, 105.0, 151.0, 200.0),
    (106.0, 200.0, 201.0, 300.0),
];

/// Flat sub-index for ozone above 200 ppb.
pub const O3_HAZARDOUS: f64 = 301.0;

const NO2_BANDS: [Band; 6] = [
    (0.0, 53.0, 0.0, 50.0),
    (54.0, 100.0, 51.0, 100.0),
    (101.0, 360.0, 101.0, 150.0),
    (361.0, 649.0, 151.0, 200.0),
    (650.0, 1249.0, 201.0, 300.0),
    (1250.0, 2049.0, 301.0, 500.0),
];

const CO_BANDS: [Band; 6] = [
    (0.0, 4.4, 0.0, 50.0),
    (4.5, 9.4, 51.0, 100.0),
    (9.5, 12.4, 101.0, 150.0),
    (12.5, 15.4, 151.0, 200.0),
    (15.5, 30.4, 201.0, 300.0),
    (30.5, 50.4, 301.0, 500.0),
];

const SO2_BANDS: [Band; 6] = [
    (0.0, 35.0, 0.0, 50.0),
    (36.0, 75.0, 51.0, 100.0),
    (76.0, 185.0, 101.0, 150.0),
    (186.0, 304.0, 151.0, 200.0),
    (305.0, 604.0, 201.0, 300.0),
    (605.0, 1004.0, 301.0, 500.0),
];

/// Sub-index reported above the last band.
fn above_bands(pollutant: Pollutant) -> f64 {
    match pollutant {
        Pollutant::O3 => O3_HAZARDOUS,
        _ => AQI_CEILING,
    }
}

fn bands(pollutant: Pollutant) -> &'static [Band] {
    match pollutant {
        Pollutant::Pm25 => &PM25_BANDS,
        Pollutant::Pm10 => &PM10_BANDS,
        Pollutant::O3 => &O3_BANDS,
        Pollutant::No2 => &NO2_BANDS,
        Pollutant::Co => &CO_BANDS,
        Pollutant::So2 => &SO2_BANDS,
    }
}

/// Sub-index for one pollutant concentration in its native unit.
///
/// Uses the first band whose upper concentration is `>= concentration`, so
/// values falling in the gap between two bands (e.g. 12.05 µg/m³ PM2.5) are
/// interpolated in the upper band. Negative and NaN inputs count as zero.
/// Beyond the last band ozone reports a flat [`O3_HAZARDOUS`] and every
/// other pollutant reports [`AQI_CEILING`].
#[must_use]
pub fn sub_index(pollutant: Pollutant, concentration: f64) -> f64 {
    let c = if concentration.is_nan() {
        0.0
    } else {
        concentration.max(0.0)
    };

    match bands(pollutant).iter().find(|&&(_, c_hi, _, _)| c <= c_hi) {
        Some(&(c_lo, c_hi, i_lo, i_hi)) => {
            ((c - c_lo) / (c_hi - c_lo) * (i_hi - i_lo) + i_lo).clamp(i_lo, i_hi)
        }
        None => above_bands(pollutant),
    }
}

/// Measured or predicted concentrations; missing pollutants are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PollutantReadings {
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub o3: Option<f64>,
    pub no2: Option<f64>,
    pub co: Option<f64>,
    pub so2: Option<f64>,
}

impl PollutantReadings {
    #[must_use]
    pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::O3 => self.o3,
            Pollutant::No2 => self.no2,
            Pollutant::Co => self.co,
            Pollutant::So2 => self.so2,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        Pollutant::ALL.iter().all(|&p| self.get(p).is_none())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AqiReport {
    pub aqi: u32,
    /// Pollutant responsible for the highest sub-index.
    pub dominant: Pollutant,
    pub quality: QualityLevel,
}

/// Composite AQI: the highest sub-index, truncated to a whole number.
///
/// Returns `None` when no pollutant is present. Ties go to the pollutant
/// listed first in [`Pollutant::ALL`].
#[must_use]
pub fn composite(readings: &PollutantReadings, catalog: &BreakpointCatalog) -> Option<AqiReport> {
    let (dominant, index) = Pollutant::ALL
        .into_iter()
        .filter_map(|p| readings.get(p).map(|c| (p, sub_index(p, c))))
        .fold(None, |best: Option<(Pollutant, f64)>, (p, index)| match best {
            Some((_, best_index)) if best_index >= index => best,
            _ => Some((p, index)),
        })?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let aqi = index.trunc() as u32;
    let quality = catalog.classify(Scale::Aqi, f64::from(aqi)).quality;

    tracing::debug!(aqi, dominant = %dominant, "computed composite aqi");

    Some(AqiReport {
        aqi,
        dominant,
        quality,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges_map_to_index_edges() {
        assert_eq!(sub_index(Pollutant::Pm25, 0.0), 0.0);
        assert_eq!(sub_index(Pollutant::Pm25, 12.0), 50.0);
        assert_eq!(sub_index(Pollutant::Pm25, 35.4), 100.0);
        assert_eq!(sub_index(Pollutant::So2, 75.0), 100.0);
        assert_eq!(sub_index(Pollutant::Co, 50.4), 500.0);
        assert_eq!(sub_index(Pollutant::Pm25, 500.0), 500.0);
    }

    #[test]
    fn interpolates_inside_band() {
        // halfway through PM10 Good band
        assert!((sub_index(Pollutant::Pm10, 27.0) - 25.0).abs() < 1e-9);
        // PM2.5 41 µg/m³ sits in the USG band
        let idx = sub_index(Pollutant::Pm25, 41.0);
        assert!(idx > 101.0 && idx < 150.0, "got {idx}");
    }

    #[test]
    fn gap_between_bands_stays_in_upper_band() {
        let idx = sub_index(Pollutant::Pm25, 12.05);
        assert!((51.0..=100.0).contains(&idx), "got {idx}");
    }

    #[test]
    fn beyond_last_band_caps_at_ceiling() {
        assert_eq!(sub_index(Pollutant::No2, 5_000.0), AQI_CEILING);
        assert_eq!(sub_index(Pollutant::Pm25, 500.2), AQI_CEILING);
    }

    #[test]
    fn ozone_above_200_ppb_is_flat_hazardous() {
        assert_eq!(sub_index(Pollutant::O3, 200.0), 300.0);
        assert_eq!(sub_index(Pollutant::O3, 201.0), O3_HAZARDOUS);
        assert_eq!(sub_index(Pollutant::O3, 700.0), O3_HAZARDOUS);

        let readings = PollutantReadings {
            o3: Some(450.0),
            ..PollutantReadings::default()
        };
        let report = composite(&readings, &BreakpointCatalog::standard()).unwrap();
        assert_eq!(report.aqi, 301);
        assert_eq!(report.quality, QualityLevel::Hazardous);
    }

    #[test]
    fn negative_and_nan_count_as_zero() {
        assert_eq!(sub_index(Pollutant::O3, -5.0), 0.0);
        assert_eq!(sub_index(Pollutant::O3, f64::NAN), 0.0);
    }

    #[test]
    fn composite_picks_highest_sub_index() {
        let readings = PollutantReadings {
            pm25: Some(8.0),
            o3: Some(80.0),
            so2: Some(12.0),
            ..PollutantReadings::default()
        };
        let report = composite(&readings, &BreakpointCatalog::standard()).unwrap();
        assert_eq!(report.dominant, Pollutant::O3);
        assert!((101..=150).contains(&report.aqi), "got {}", report.aqi);
        assert_eq!(report.quality, QualityLevel::UnhealthyForSensitiveGroups);
    }

    #[test]
    fn composite_truncates_fractional_index() {
        // PM10 27 -> 25.0; PM10 28 -> 25.925..
        let readings = PollutantReadings {
            pm10: Some(28.0),
            ..PollutantReadings::default()
        };
        let report = composite(&readings, &BreakpointCatalog::standard()).unwrap();
        assert_eq!(report.aqi, 25);
        assert_eq!(report.quality, QualityLevel::Good);
    }

    #[test]
    fn composite_of_nothing_is_none() {
        let readings = PollutantReadings::default();
        assert!(readings.is_empty());
        assert!(composite(&readings, &BreakpointCatalog::standard()).is_none());
    }

    #[test]
    fn readings_deserialize_with_missing_fields() {
        let readings: PollutantReadings = serde_json::from_str(r#"{"co": 3.2}"#).unwrap();
        assert_eq!(readings.co, Some(3.2));
        assert!(readings.pm25.is_none());
        assert!(!readings.is_empty());
    }
}
