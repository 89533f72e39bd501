//! OpenStreetMap Nominatim reverse-geocoding provider.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use super::types::{GeocodedAddress, ReverseGeocodeProvider};
use crate::config::GEOCODE_LANGUAGE;
use crate::error_handling::GeocodeUnavailable;
use crate::geo::Coordinate;

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<NominatimAddress>,
}

/// Subset of Nominatim's `address` object.
///
/// Which keys are present depends on the place type, hence the candidate lists.
#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    state: Option<String>,
    county: Option<String>,
    suburb: Option<String>,
    neighbourhood: Option<String>,
    district: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
}

impl From<NominatimAddress> for GeocodedAddress {
    fn from(a: NominatimAddress) -> Self {
        GeocodedAddress {
            city: a.city.or(a.town).or(a.state).or(a.county),
            district: a.suburb.or(a.neighbourhood).or(a.district),
            country_name: a.country,
            country_code: a.country_code,
        }
    }
}

/// Reverse geocoder backed by a Nominatim `/reverse` endpoint.
pub struct NominatimClient {
    client: Arc<reqwest::Client>,
    base_url: String,
}

impl NominatimClient {
    /// `client` should already carry the User-Agent and timeout.
    pub fn new(client: Arc<reqwest::Client>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ReverseGeocodeProvider for NominatimClient {
    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<GeocodedAddress, GeocodeUnavailable> {
        debug!("Calling reverse geocoder at {} for {}", self.base_url, coordinate);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", coordinate.latitude().to_string()),
                ("lon", coordinate.longitude().to_string()),
                ("accept-language", GEOCODE_LANGUAGE.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodeUnavailable::TimedOut
                } else {
                    GeocodeUnavailable::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeUnavailable::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: ReverseResponse = serde_json::from_str(&body)
            .map_err(|e| GeocodeUnavailable::MalformedResponse(e.to_string()))?;
        let address = parsed.address.ok_or_else(|| {
            GeocodeUnavailable::MalformedResponse("response has no address object".to_string())
        })?;

        Ok(address.into())
    }
}
