//! Great-circle distance and the flat km-to-degree approximation used for
//! sizing areas and placing sample circles.

use aerogrid_core::{GeoPoint, ViewBounds};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per degree of latitude (and of longitude at the equator).
pub const KM_PER_DEGREE: f64 = 111.32;

/// Haversine distance between two points in kilometres.
#[must_use]
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Approximate area of the viewport in km².
///
/// Width is measured along the northern edge, height along the western edge.
#[must_use]
pub fn area_km2(bounds: &ViewBounds) -> f64 {
    let north_west = GeoPoint {
        latitude: bounds.north(),
        longitude: bounds.west(),
    };
    let north_east = GeoPoint {
        latitude: bounds.north(),
        longitude: bounds.east(),
    };
    let south_west = GeoPoint {
        latitude: bounds.south(),
        longitude: bounds.west(),
    };

    distance_km(north_west, north_east) * distance_km(north_west, south_west)
}

/// Floor for `cos(latitude)` so longitude steps stay finite at the poles.
const MIN_LON_SCALE_COS: f64 = 0.01;

/// Fold a longitude into `[-180, 180)`.
#[must_use]
pub fn wrap_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}

/// Move `center` by the given kilometre offsets.
///
/// Uses 1° ≈ 111.32 km, with longitude degrees widened by `1 / cos(latitude)`.
/// The cosine is floored near the poles, latitude is clamped to ±90 and
/// longitude wraps across the antimeridian, so the result is always a valid
/// coordinate.
#[must_use]
pub fn offset_km(center: GeoPoint, north_km: f64, east_km: f64) -> GeoPoint {
    let cos_lat = center.latitude.to_radians().cos().max(MIN_LON_SCALE_COS);
    let lon_scale = KM_PER_DEGREE * cos_lat;
    GeoPoint {
        latitude: (center.latitude + north_km / KM_PER_DEGREE).clamp(-90.0, 90.0),
        longitude: wrap_longitude(center.longitude + east_km / lon_scale),
    }
}
