use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Health category shared by every breakpoint table, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl QualityLevel {
    pub const ALL: [QualityLevel; 6] = [
        QualityLevel::Good,
        QualityLevel::Moderate,
        QualityLevel::UnhealthyForSensitiveGroups,
        QualityLevel::Unhealthy,
        QualityLevel::VeryUnhealthy,
        QualityLevel::Hazardous,
    ];

    /// Display color as a lowercase RGB hex string.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            QualityLevel::Good => "#00e400",
            QualityLevel::Moderate => "#ffff00",
            QualityLevel::UnhealthyForSensitiveGroups => "#ff7e00",
            QualityLevel::Unhealthy => "#ff0000",
            QualityLevel::VeryUnhealthy => "#8f3f97",
            QualityLevel::Hazardous => "#7e0023",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QualityLevel::Good => "Good",
            QualityLevel::Moderate => "Moderate",
            QualityLevel::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            QualityLevel::Unhealthy => "Unhealthy",
            QualityLevel::VeryUnhealthy => "Very Unhealthy",
            QualityLevel::Hazardous => "Hazardous",
        }
    }

    /// Severity rank, `0` for [`QualityLevel::Good`] through `5`.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pollutants carried by the prediction dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm25,
    Pm10,
    O3,
    No2,
    Co,
    So2,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::O3,
        Pollutant::No2,
        Pollutant::Co,
        Pollutant::So2,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Pm10 => "pm10",
            Pollutant::O3 => "o3",
            Pollutant::No2 => "no2",
            Pollutant::Co => "co",
            Pollutant::So2 => "so2",
        }
    }

    /// Native concentration unit.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => "µg/m³",
            Pollutant::O3 | Pollutant::No2 | Pollutant::So2 => "ppb",
            Pollutant::Co => "ppm",
        }
    }
}

impl std::fmt::Display for Pollutant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pollutant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pm25" | "pm2.5" => Ok(Pollutant::Pm25),
            "pm10" => Ok(Pollutant::Pm10),
            "o3" => Ok(Pollutant::O3),
            "no2" => Ok(Pollutant::No2),
            "co" => Ok(Pollutant::Co),
            "so2" => Ok(Pollutant::So2),
            other => Err(CoreError::UnknownPollutant(other.to_string())),
        }
    }
}
