//! ZIP code lookup via the Zippopotam.us API

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::ZipLookupConfig;
use crate::error::ZipLookupError;
use crate::models::{RawZipResponse, ZipPlace};

/// Trait for ZIP code lookup clients
#[async_trait]
pub trait ZipLookupClient: Send + Sync {
    /// Resolve a ZIP code to its first reported place
    async fn lookup(&self, zip: &str) -> Result<ZipPlace, ZipLookupError>;
}

/// Zippopotam.us client
#[derive(Debug)]
pub struct ZippopotamClient {
    client: Client,
    config: ZipLookupConfig,
}

impl ZippopotamClient {
    /// Create a new Zippopotam.us client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &ZipLookupConfig) -> Result<Self, ZipLookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ZipLookupError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn lookup_url(&self, zip: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.country,
            zip
        )
    }

    /// Parse the raw response body into the first place
    fn parse_response(zip: &str, body: &str) -> Result<ZipPlace, ZipLookupError> {
        let raw: RawZipResponse =
            serde_json::from_str(body).map_err(|e| ZipLookupError::ParseError(e.to_string()))?;

        let place = raw
            .places
            .into_iter()
            .next()
            .ok_or_else(|| ZipLookupError::UnknownZip(zip.to_string()))?;

        let location = GeoLocation::parse(&place.latitude, &place.longitude)
            .map_err(|e| ZipLookupError::ParseError(e.to_string()))?;

        Ok(ZipPlace {
            zip: zip.to_string(),
            place_name: place.place_name,
            state: place.state_abbreviation,
            location,
        })
    }
}

#[async_trait]
impl ZipLookupClient for ZippopotamClient {
    #[instrument(skip(self))]
    async fn lookup(&self, zip: &str) -> Result<ZipPlace, ZipLookupError> {
        let url = self.lookup_url(zip);
        debug!(%url, "Looking up ZIP code");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ZipLookupError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                ZipLookupError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "ZIP lookup rejected");
            return Err(ZipLookupError::UnknownZip(zip.to_string()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ZipLookupError::ParseError(e.to_string()))?;

        let place = Self::parse_response(zip, &body)?;
        debug!(place = %place.place_name, location = %place.location, "ZIP resolved");
        Ok(place)
    }
}
