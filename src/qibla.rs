//! Qibla direction and distance.

use serde::Serialize;

use crate::config::{KAABA_LATITUDE, KAABA_LONGITUDE};
use crate::geo::{great_circle_distance_km, initial_bearing, Coordinate};

/// The Kaaba, Mecca.
pub const KAABA: Coordinate = Coordinate::from_trusted(KAABA_LATITUDE, KAABA_LONGITUDE);

/// Bearing and distance from a position to the Kaaba.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QiblaResult {
    /// Compass heading, 0 = North, within [0, 360)
    pub bearing_degrees: f64,
    /// Great-circle distance, never negative
    pub distance_km: f64,
}

impl QiblaResult {
    /// Whole degrees and whole kilometres, as shown to the user.
    ///
    /// A bearing that rounds up to 360 is reported as 0.
    pub fn rounded(&self) -> (u16, u64) {
        let degrees = (self.bearing_degrees.round() as u16) % 360;
        (degrees, self.distance_km.round() as u64)
    }
}

impl std::fmt::Display for QiblaResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (degrees, km) = self.rounded();
        write!(f, "Kıble yönü: {}° · Kabe'ye uzaklık: {} km", degrees, km)
    }
}

/// Computes [`QiblaResult`]s against a fixed target.
#[derive(Debug, Clone, Copy)]
pub struct QiblaCalculator {
    target: Coordinate,
}

impl Default for QiblaCalculator {
    fn default() -> Self {
        Self { target: KAABA }
    }
}

impl QiblaCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compute(&self, from: &Coordinate) -> QiblaResult {
        QiblaResult {
            bearing_degrees: initial_bearing(from, &self.target),
            distance_km: great_circle_distance_km(from, &self.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearby_point_is_north_east_and_close() {
        let from = Coordinate::new(21.0, 39.0).unwrap();
        let result = QiblaCalculator::new().compute(&from);
        assert!(
            (0.0..90.0).contains(&result.bearing_degrees),
            "bearing {}",
            result.bearing_degrees
        );
        assert!(result.distance_km > 0.0 && result.distance_km < 200.0);
    }

    #[test]
    fn test_ankara_points_south_east() {
        let ankara = Coordinate::new(39.9334, 32.8597).unwrap();
        let result = QiblaCalculator::new().compute(&ankara);
        assert!(
            (140.0..170.0).contains(&result.bearing_degrees),
            "bearing {}",
            result.bearing_degrees
        );
        assert!(
            (2000.0..2200.0).contains(&result.distance_km),
            "distance {}",
            result.distance_km
        );
    }

    #[test]
    fn test_at_target_distance_is_zero() {
        let result = QiblaCalculator::new().compute(&KAABA);
        assert_eq!(result.distance_km, 0.0);
        assert!((0.0..360.0).contains(&result.bearing_degrees));
    }

    #[test]
    fn test_rounded_wraps_360() {
        let r = QiblaResult {
            bearing_degrees: 359.7,
            distance_km: 12.4,
        };
        assert_eq!(r.rounded(), (0, 12));
    }

    #[test]
    fn test_display() {
        let r = QiblaResult {
            bearing_degrees: 152.4,
            distance_km: 2147.6,
        };
        assert_eq!(r.to_string(), "Kıble yönü: 152° · Kabe'ye uzaklık: 2148 km");
    }
}
