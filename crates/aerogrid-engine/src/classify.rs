//! Breakpoint tables mapping concentrations (or AQI) to a health category.
//!
//! Every table shares the six-tier palette from [`QualityLevel`]. Lookup is a
//! linear scan for the first entry whose upper bound is `>= value`; anything
//! past the last bound (including NaN) falls into the last, most severe entry.

use std::str::FromStr;

use aerogrid_core::{Pollutant, QualityLevel};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Names a breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    /// Composite, unitless AQI.
    Aqi,
    Pm25,
    Pm10,
    O3,
    No2,
    Co,
    So2,
    /// Coarse SO₂ ramp used for the prediction heatmap. Not interchangeable
    /// with [`Scale::So2`].
    So2Simplified,
}

impl Scale {
    pub const ALL: [Scale; 8] = [
        Scale::Aqi,
        Scale::Pm25,
        Scale::Pm10,
        Scale::O3,
        Scale::No2,
        Scale::Co,
        Scale::So2,
        Scale::So2Simplified,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Scale::Aqi => "aqi",
            Scale::Pm25 => "pm25",
            Scale::Pm10 => "pm10",
            Scale::O3 => "o3",
            Scale::No2 => "no2",
            Scale::Co => "co",
            Scale::So2 => "so2",
            Scale::So2Simplified => "so2_simplified",
        }
    }

    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Scale::Aqi => "index",
            Scale::Pm25 => Pollutant::Pm25.unit(),
            Scale::Pm10 => Pollutant::Pm10.unit(),
            Scale::O3 => Pollutant::O3.unit(),
            Scale::No2 => Pollutant::No2.unit(),
            Scale::Co => Pollutant::Co.unit(),
            Scale::So2 | Scale::So2Simplified => Pollutant::So2.unit(),
        }
    }
}

impl From<Pollutant> for Scale {
    fn from(pollutant: Pollutant) -> Self {
        match pollutant {
            Pollutant::Pm25 => Scale::Pm25,
            Pollutant::Pm10 => Scale::Pm10,
            Pollutant::O3 => Scale::O3,
            Pollutant::No2 => Scale::No2,
            Pollutant::Co => Scale::Co,
            Pollutant::So2 => Scale::So2,
        }
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scale {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Scale::ALL
            .into_iter()
            .find(|scale| scale.as_str() == wanted)
            .ok_or_else(|| EngineError::UnknownScale(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakpoint {
    pub upper_bound: f64,
    pub quality: QualityLevel,
}

/// Result of classifying one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub color: &'static str,
    pub quality: QualityLevel,
}

impl From<QualityLevel> for Classification {
    fn from(quality: QualityLevel) -> Self {
        Self {
            color: quality.color(),
            quality,
        }
    }
}

/// One legend row for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendEntry {
    pub quality: QualityLevel,
    pub label: &'static str,
    pub color: &'static str,
    pub upper_bound: f64,
}

/// Ordered breakpoints; never empty, bounds strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable {
    entries: Vec<Breakpoint>,
}

impl BreakpointTable {
    /// Build a table from ordered entries.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBreakpoints`] when `entries` is empty or
    /// the upper bounds are not finite and strictly increasing.
    pub fn new(entries: Vec<Breakpoint>) -> Result<Self, EngineError> {
        if entries.is_empty() {
            return Err(EngineError::InvalidBreakpoints {
                reason: "table has no entries".to_string(),
            });
        }
        if let Some(bad) = entries.iter().find(|e| !e.upper_bound.is_finite()) {
            return Err(EngineError::InvalidBreakpoints {
                reason: format!("upper bound {} is not finite", bad.upper_bound),
            });
        }
        if let Some(pair) = entries
            .windows(2)
            .find(|pair| pair[0].upper_bound >= pair[1].upper_bound)
        {
            return Err(EngineError::InvalidBreakpoints {
                reason: format!(
                    "upper bounds must strictly increase: {} then {}",
                    pair[0].upper_bound, pair[1].upper_bound
                ),
            });
        }
        Ok(Self { entries })
    }

    /// Standard six-tier table from the upper bound of each category.
    fn six_tier(bounds: [f64; 6]) -> Self {
        let entries = QualityLevel::ALL
            .into_iter()
            .zip(bounds)
            .map(|(quality, upper_bound)| Breakpoint {
                upper_bound,
                quality,
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[Breakpoint] {
        &self.entries
    }

    /// The most severe entry, which catches every value above the table.
    #[must_use]
    pub fn last(&self) -> &Breakpoint {
        // non-empty by construction
        &self.entries[self.entries.len() - 1]
    }

    #[must_use]
    pub fn classify(&self, value: f64) -> Classification {
        self.entries
            .iter()
            .find(|entry| entry.upper_bound >= value)
            .unwrap_or_else(|| self.last())
            .quality
            .into()
    }

    #[must_use]
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.entries
            .iter()
            .map(|entry| LegendEntry {
                quality: entry.quality,
                label: entry.quality.label(),
                color: entry.quality.color(),
                upper_bound: entry.upper_bound,
            })
            .collect()
    }
}

/// Every table the engine classifies against, built once at startup.
#[derive(Debug, Clone)]
pub struct BreakpointCatalog {
    aqi: BreakpointTable,
    pm25: BreakpointTable,
    pm10: BreakpointTable,
    o3: BreakpointTable,
    no2: BreakpointTable,
    co: BreakpointTable,
    so2: BreakpointTable,
    so2_simplified: BreakpointTable,
}

impl BreakpointCatalog {
    /// US EPA category ceilings plus the simplified SO₂ heatmap ramp.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            aqi: BreakpointTable::six_tier([50.0, 100.0, 150.0, 200.0, 300.0, 500.0]),
            pm25: BreakpointTable::six_tier([12.0, 35.4, 55.4, 150.4, 250.4, 500.4]),
            pm10: BreakpointTable::six_tier([54.0, 154.0, 254.0, 354.0, 424.0, 604.0]),
            o3: BreakpointTable::six_tier([54.0, 70.0, 85.0, 105.0, 200.0, 604.0]),
            no2: BreakpointTable::six_tier([53.0, 100.0, 360.0, 649.0, 1249.0, 2049.0]),
            co: BreakpointTable::six_tier([4.4, 9.4, 12.4, 15.4, 30.4, 50.4]),
            so2: BreakpointTable::six_tier([35.0, 75.0, 185.0, 304.0, 604.0, 1004.0]),
            so2_simplified: BreakpointTable::six_tier([10.0, 20.0, 30.0, 40.0, 50.0, 100.0]),
        }
    }

    /// Replace one table, e.g. with a test fixture.
    #[must_use]
    pub fn with_table(mut self, scale: Scale, table: BreakpointTable) -> Self {
        *self.table_mut(scale) = table;
        self
    }

    #[must_use]
    pub fn table(&self, scale: Scale) -> &BreakpointTable {
        match scale {
            Scale::Aqi => &self.aqi,
            Scale::Pm25 => &self.pm25,
            Scale::Pm10 => &self.pm10,
            Scale::O3 => &self.o3,
            Scale::No2 => &self.no2,
            Scale::Co => &self.co,
            Scale::So2 => &self.so2,
            Scale::So2Simplified => &self.so2_simplified,
        }
    }

    fn table_mut(&mut self, scale: Scale) -> &mut BreakpointTable {
        match scale {
            Scale::Aqi => &mut self.aqi,
            Scale::Pm25 => &mut self.pm25,
            Scale::Pm10 => &mut self.pm10,
            Scale::O3 => &mut self.o3,
            Scale::No2 => &mut self.no2,
            Scale::Co => &mut self.co,
            Scale::So2 => &mut self.so2,
            Scale::So2Simplified => &mut self.so2_simplified,
        }
    }

    #[must_use]
    pub fn classify(&self, scale: Scale, value: f64) -> Classification {
        self.table(scale).classify(value)
    }

    #[must_use]
    pub fn legend(&self, scale: Scale) -> Vec<LegendEntry> {
        self.table(scale).legend()
    }
}

impl Default for BreakpointCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
