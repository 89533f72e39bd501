//! Great-circle bearing and distance on a spherical Earth.
//!
//! Inputs are already-validated [`Coordinate`]s, so neither function can fail.

use crate::config::EARTH_RADIUS_KM;
use crate::geo::Coordinate;

/// Initial great-circle bearing from `from` towards `to`.
///
/// # Returns
/// Compass heading in degrees, 0 = North, within [0, 360).
pub fn initial_bearing(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let d_lon = (to.longitude() - from.longitude()).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    let bearing = y.atan2(x).to_degrees();

    let normalized = if bearing < 0.0 { bearing + 360.0 } else { bearing };
    // -0.0 + 360 lands exactly on 360
    if normalized >= 360.0 {
        normalized - 360.0
    } else {
        normalized
    }
}

/// Haversine distance between two points.
///
/// # Returns
/// Distance in kilometres using a mean Earth radius of 6371 km.
pub fn great_circle_distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h slightly outside [0, 1] near antipodes
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
