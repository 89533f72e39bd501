//! Location resolution.
//!
//! This module turns raw device coordinates into a [`ResolvedLocation`],
//! applying emulator/unset-fix guards and the supported-region check, with a
//! pluggable [`ReverseGeocodeProvider`] (Nominatim over HTTP by default).

mod nominatim;
mod resolver;
mod types;

// Re-export public API
pub use nominatim::NominatimClient;
pub use resolver::{is_supported_country, LocationResolver, EMULATOR_DEFAULT};
pub use types::{GeocodedAddress, ResolvedLocation, ReverseGeocodeProvider};
