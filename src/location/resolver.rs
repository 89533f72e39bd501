//! Location resolution with guard rules.
//!
//! Resolution never fails: every unreliable input or provider failure
//! degrades to the canonical fallback location with `is_fallback = true`.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use super::types::{GeocodedAddress, ResolvedLocation, ReverseGeocodeProvider};
use crate::config::{
    DEFAULT_TIMEOUT_SECS, EMULATOR_LATITUDE, EMULATOR_LONGITUDE, EMULATOR_TOLERANCE_DEG,
    NEUTRAL_CITY, NEUTRAL_DISTRICT, SUPPORTED_COUNTRY_CODE, SUPPORTED_COUNTRY_NAMES,
};
use crate::error_handling::GeocodeUnavailable;
use crate::geo::Coordinate;

/// Default position reported by Android emulators.
pub const EMULATOR_DEFAULT: Coordinate =
    Coordinate::from_trusted(EMULATOR_LATITUDE, EMULATOR_LONGITUDE);

/// Why a raw coordinate was replaced by the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardRule {
    EmulatorDefault,
    UnsetFix,
}

/// True when the country matches the supported region by name or ISO code.
pub fn is_supported_country(address: &GeocodedAddress) -> bool {
    let by_name = address
        .country_name
        .as_deref()
        .map(|name| SUPPORTED_COUNTRY_NAMES.contains(&name.trim()))
        .unwrap_or(false);
    let by_code = address
        .country_code
        .as_deref()
        .map(|code| code.trim().eq_ignore_ascii_case(SUPPORTED_COUNTRY_CODE))
        .unwrap_or(false);
    by_name || by_code
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Maps raw device coordinates to a [`ResolvedLocation`].
#[derive(Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn ReverseGeocodeProvider>,
    timeout: Duration,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn ReverseGeocodeProvider>) -> Self {
        Self {
            geocoder,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Bounds how long the geocoder may take before the fallback is used.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn guard(raw: &Coordinate) -> Option<GuardRule> {
        if raw.is_within(&EMULATOR_DEFAULT, EMULATOR_TOLERANCE_DEG) {
            return Some(GuardRule::EmulatorDefault);
        }
        if raw.latitude() == 0.0 || raw.longitude() == 0.0 {
            return Some(GuardRule::UnsetFix);
        }
        None
    }

    /// Resolves `raw` into a place, substituting the fallback when needed.
    ///
    /// # Guard rules, in order
    ///
    /// 1. Emulator default position (within 0.01° per axis): fallback, geocoder not called.
    /// 2. Latitude or longitude exactly zero (no usable fix): fallback, geocoder not called.
    /// 3. Geocoder failure or timeout: fallback.
    /// 4. Country outside the supported region: fallback.
    ///
    /// Otherwise the raw coordinate is kept; absent city/district fields are
    /// replaced by neutral labels.
    pub async fn resolve(&self, raw: Coordinate) -> ResolvedLocation {
        if let Some(rule) = Self::guard(&raw) {
            match rule {
                GuardRule::EmulatorDefault => {
                    info!("Emulator default position {} detected, using fallback location", raw)
                }
                GuardRule::UnsetFix => {
                    warn!("Position {} has an unset axis, using fallback location", raw)
                }
            }
            return ResolvedLocation::fallback();
        }

        let lookup = tokio::time::timeout(self.timeout, self.geocoder.reverse_geocode(raw)).await;
        let address = match lookup {
            Ok(Ok(address)) => address,
            Ok(Err(e)) => {
                warn!("Reverse geocode failed for {}: {}; using fallback location", raw, e);
                return ResolvedLocation::fallback();
            }
            Err(_) => {
                warn!(
                    "Reverse geocode failed for {}: {}; using fallback location",
                    raw,
                    GeocodeUnavailable::TimedOut
                );
                return ResolvedLocation::fallback();
            }
        };
        debug!("Reverse geocode for {}: {:?}", raw, address);

        if !is_supported_country(&address) {
            info!(
                "Position {} is outside the supported region ({:?}/{:?}), using fallback location",
                raw, address.country_name, address.country_code
            );
            return ResolvedLocation::fallback();
        }

        let location = ResolvedLocation {
            coordinate: raw,
            city: non_empty(address.city).unwrap_or_else(|| NEUTRAL_CITY.to_string()),
            district: Some(
                non_empty(address.district).unwrap_or_else(|| NEUTRAL_DISTRICT.to_string()),
            ),
            is_fallback: false,
        };
        info!("Resolved {} to {}", raw, location.display_name());
        location
    }
}
