use async_trait::async_trait;
use serde::Deserialize;

use crate::core::config::GeocodeConfig;
use crate::core::error::{AppError, Result};
use crate::shared::constants::ADDRESS_NOT_FOUND;

/// Best-effort address line for a coordinate pair. Any failure degrades to
/// the placeholder; callers never see an error.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn address_for(&self, latitude: f64, longitude: f64) -> String;
}

/// Nominatim reverse-geocoding response
#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeResponse {
    pub display_name: Option<String>,
}

/// Reverse geocoding for report coordinates, via Nominatim.
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodingService {
    pub fn new(config: &GeocodeConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder()
                .user_agent("CivicConnectClient/0.1 (citizen-report-client)")
                .build()?,
            base_url: config.base_url.clone(),
        })
    }

    /// Look up the display address for a coordinate pair.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}",
            self.base_url,
            urlencoding::encode(&latitude.to_string()),
            urlencoding::encode(&longitude.to_string())
        );

        tracing::debug!("Reverse geocoding: {},{} -> {}", latitude, longitude, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Nominatim request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Nominatim request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("Nominatim returned status: {}", response.status());
            return Ok(None);
        }

        let body: ReverseGeocodeResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Nominatim response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse Nominatim response: {}", e))
        })?;

        Ok(body.display_name)
    }
}

#[async_trait]
impl ReverseGeocoder for GeocodingService {
    async fn address_for(&self, latitude: f64, longitude: f64) -> String {
        match self.reverse(latitude, longitude).await {
            Ok(Some(address)) => address,
            Ok(None) => ADDRESS_NOT_FOUND.to_string(),
            Err(e) => {
                tracing::warn!("Reverse geocoding failed: {}", e);
                ADDRESS_NOT_FOUND.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_response_parses_display_name() {
        let body: ReverseGeocodeResponse =
            serde_json::from_str(r#"{"display_name":"Elm St, Chennai","place_id":42}"#).unwrap();
        assert_eq!(body.display_name.as_deref(), Some("Elm St, Chennai"));

        let empty: ReverseGeocodeResponse = serde_json::from_str(r#"{"error":"no result"}"#).unwrap();
        assert!(empty.display_name.is_none());
    }
}
