//! Geographic coordinate value type.

use serde::{Deserialize, Serialize};

use crate::error_handling::InvalidCoordinate;

/// A validated WGS84 position in decimal degrees.
///
/// Latitude is within [-90, 90] and longitude within [-180, 180]; both are
/// finite. The only way to obtain one is through [`Coordinate::new`] (or
/// deserialization, which goes through the same check).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Creates a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        if lat_ok && lon_ok {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// For compile-time constants known to be in range.
    pub(crate) const fn from_trusted(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// True when both axes differ from `other` by strictly less than `tolerance_deg`.
    pub fn is_within(&self, other: &Coordinate, tolerance_deg: f64) -> bool {
        (self.latitude - other.latitude).abs() < tolerance_deg
            && (self.longitude - other.longitude).abs() < tolerance_deg
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_range_limits() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = Coordinate::new(90.5, 10.0).unwrap_err();
        assert_eq!(err.latitude, 90.5);
        assert!(Coordinate::new(10.0, -180.01).is_err());
        assert!(Coordinate::new(f64::NAN, 10.0).is_err());
        assert!(Coordinate::new(10.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_is_within_is_strict_per_axis() {
        let origin = Coordinate::new(37.4220, -122.0841).unwrap();
        let near = Coordinate::new(37.4250, -122.0800).unwrap();
        let off_lon = Coordinate::new(37.4220, -122.1).unwrap();
        assert!(near.is_within(&origin, 0.01));
        assert!(!off_lon.is_within(&origin, 0.01));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Coordinate = serde_json::from_str(r#"{"latitude":41.0,"longitude":29.0}"#).unwrap();
        assert_eq!(ok.latitude(), 41.0);
        let bad = serde_json::from_str::<Coordinate>(r#"{"latitude":141.0,"longitude":29.0}"#);
        assert!(bad.is_err());
    }
}
