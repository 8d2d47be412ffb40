//! Sample-point layout.
//!
//! Viewport queries lay points on a near-square grid centred inside each
//! cell of the bounds. Single-location queries place points evenly around a
//! circle whose radius depends on the zoom tier.

use std::f64::consts::PI;

use aerogrid_core::{GeoPoint, ViewBounds};
use serde::Serialize;

use crate::geo::offset_km;

/// Points sampled around a single location.
pub const CIRCLE_POINT_COUNT: usize = 8;

/// Density class chosen from the map zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomTier {
    City,
    District,
    Neighborhood,
}

impl ZoomTier {
    /// Zoom levels below this show the whole city as a single sample.
    pub const CITY_ZOOM: i32 = 10;
    /// Zoom levels at or above this use the finest grid.
    pub const NEIGHBORHOOD_ZOOM: i32 = 15;

    #[must_use]
    pub fn from_zoom(zoom_level: i32) -> Self {
        if zoom_level < Self::CITY_ZOOM {
            ZoomTier::City
        } else if zoom_level < Self::NEIGHBORHOOD_ZOOM {
            ZoomTier::District
        } else {
            ZoomTier::Neighborhood
        }
    }

    /// Grid points generated for a viewport at this tier.
    #[must_use]
    pub fn grid_points(self) -> usize {
        match self {
            ZoomTier::City => 1,
            ZoomTier::District => 9,
            ZoomTier::Neighborhood => 25,
        }
    }

    /// Sampling-circle radius for single-location queries.
    #[must_use]
    pub fn circle_radius_km(self) -> f64 {
        match self {
            ZoomTier::City => 10.0,
            ZoomTier::District => 5.0,
            ZoomTier::Neighborhood => 2.0,
        }
    }
}

/// Lay out `point_count` points over `bounds`, row-major from the south-west.
///
/// Uses `floor(sqrt(n))` rows and `ceil(n / rows)` columns with each point at
/// the centre of its cell, then truncates to exactly `point_count`.
#[must_use]
pub fn generate_grid(bounds: &ViewBounds, point_count: usize) -> Vec<GeoPoint> {
    if point_count == 0 {
        return Vec::new();
    }

    let rows = point_count.isqrt();
    let cols = point_count.div_ceil(rows);

    #[allow(clippy::cast_precision_loss)]
    let lat_step = (bounds.north() - bounds.south()) / rows as f64;
    #[allow(clippy::cast_precision_loss)]
    let lon_step = (bounds.east() - bounds.west()) / cols as f64;

    let mut points = Vec::with_capacity(point_count);
    for row in 0..rows {
        for col in 0..cols {
            if points.len() == point_count {
                return points;
            }
            #[allow(clippy::cast_precision_loss)]
            points.push(GeoPoint {
                latitude: bounds.south() + (row as f64 + 0.5) * lat_step,
                longitude: bounds.west() + (col as f64 + 0.5) * lon_step,
            });
        }
    }
    points
}

/// Place `point_count` points evenly around a circle of `radius_km`.
///
/// The first point sits due east of `center`; subsequent points proceed
/// counter-clockwise.
#[must_use]
pub fn circle_around(center: GeoPoint, radius_km: f64, point_count: usize) -> Vec<GeoPoint> {
    (0..point_count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = (i as f64 / point_count as f64) * 2.0 * PI;
            offset_km(center, radius_km * angle.sin(), radius_km * angle.cos())
        })
        .collect()
}
