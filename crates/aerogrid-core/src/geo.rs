//! Geographic value types shared by the engine, server and CLI.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a validated point.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] when either coordinate is not
    /// finite or falls outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        if !is_latitude(latitude) || !is_longitude(longitude) {
            return Err(CoreError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Rectangular viewport in decimal degrees.
///
/// Always satisfies `north > south` and `east > west`. Viewports crossing the
/// antimeridian are rejected rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewBounds {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl ViewBounds {
    /// Build validated bounds.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] for out-of-range or non-finite
    /// edges and [`CoreError::DegenerateBounds`] when the box has no area.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self, CoreError> {
        GeoPoint::new(north, east)?;
        GeoPoint::new(south, west)?;

        if north <= south {
            return Err(CoreError::DegenerateBounds {
                reason: format!("north ({north}) must be greater than south ({south})"),
            });
        }
        if east <= west {
            return Err(CoreError::DegenerateBounds {
                reason: format!("east ({east}) must be greater than west ({west})"),
            });
        }

        Ok(Self {
            north,
            south,
            east,
            west,
        })
    }

    #[must_use]
    pub fn north(&self) -> f64 {
        self.north
    }

    #[must_use]
    pub fn south(&self) -> f64 {
        self.south
    }

    #[must_use]
    pub fn east(&self) -> f64 {
        self.east
    }

    #[must_use]
    pub fn west(&self) -> f64 {
        self.west
    }

    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            latitude: (self.north + self.south) / 2.0,
            longitude: (self.east + self.west) / 2.0,
        }
    }

    /// Inclusive containment check.
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.south..=self.north).contains(&point.latitude)
            && (self.west..=self.east).contains(&point.longitude)
    }
}

/// Wire form of [`ViewBounds`]; validated on conversion.
#[derive(Debug, Deserialize)]
struct RawBounds {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl<'de> Deserialize<'de> for ViewBounds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawBounds::deserialize(deserializer)?;
        ViewBounds::new(raw.north, raw.south, raw.east, raw.west).map_err(serde::de::Error::custom)
    }
}

fn is_latitude(value: f64) -> bool {
    value.is_finite() && (-90.0..=90.0).contains(&value)
}

fn is_longitude(value: f64) -> bool {
    value.is_finite() && (-180.0..=180.0).contains(&value)
}
