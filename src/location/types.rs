//! Location data structures and the reverse-geocoding contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{FALLBACK_CITY, FALLBACK_DISTRICT, FALLBACK_LATITUDE, FALLBACK_LONGITUDE};
use crate::error_handling::GeocodeUnavailable;
use crate::geo::Coordinate;

/// Address fields returned by a reverse-geocoding provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeocodedAddress {
    pub city: Option<String>,
    pub district: Option<String>,
    pub country_name: Option<String>,
    /// ISO 3166-1 alpha-2, any case
    pub country_code: Option<String>,
}

/// Resolves a coordinate into a place description.
///
/// Implementations perform a single request per call and must be
/// `Send + Sync` so they can be shared behind an `Arc`.
#[async_trait]
pub trait ReverseGeocodeProvider: Send + Sync {
    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<GeocodedAddress, GeocodeUnavailable>;
}

/// Outcome of location resolution.
///
/// `is_fallback` is set whenever a guard rule substituted the canonical
/// fallback location, so the UI can mark the position as approximate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,
    pub city: String,
    pub district: Option<String>,
    pub is_fallback: bool,
}

impl ResolvedLocation {
    /// The canonical fallback: Çankaya, Ankara.
    pub fn fallback() -> Self {
        Self {
            coordinate: Coordinate::from_trusted(FALLBACK_LATITUDE, FALLBACK_LONGITUDE),
            city: FALLBACK_CITY.to_string(),
            district: Some(FALLBACK_DISTRICT.to_string()),
            is_fallback: true,
        }
    }

    /// `"district, city"`, or just the city when there is no district.
    pub fn display_name(&self) -> String {
        match &self.district {
            Some(district) => format!("{}, {}", district, self.city),
            None => self.city.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_location() {
        let fallback = ResolvedLocation::fallback();
        assert!(fallback.is_fallback);
        assert_eq!(fallback.city, "Ankara");
        assert_eq!(fallback.coordinate.latitude(), 39.9334);
        assert_eq!(fallback.display_name(), "Çankaya, Ankara");
    }

    #[test]
    fn test_display_name_without_district() {
        let location = ResolvedLocation {
            district: None,
            city: "Konya".into(),
            ..ResolvedLocation::fallback()
        };
        assert_eq!(location.display_name(), "Konya");
    }
}
