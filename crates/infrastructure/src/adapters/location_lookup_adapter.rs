//! Location lookup adapters - implement the lookup ports using integration_geocoding

use application::error::ApplicationError;
use application::ports::{GeocodingPort, ResolvedPlace, ZipLookupPort};
use async_trait::async_trait;
use integration_geocoding::{
    GeocodingClient, NominatimConfig, NominatimGeocodingClient, ZipLookupClient,
    ZipLookupConfig, ZipLookupError, ZippopotamClient,
};
use tracing::{debug, instrument, warn};

/// ZIP lookup through Zippopotam.us
pub struct ZipLookupAdapter {
    client: Box<dyn ZipLookupClient>,
}

impl std::fmt::Debug for ZipLookupAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipLookupAdapter")
            .field("client", &"ZipLookupClient")
            .finish()
    }
}

impl ZipLookupAdapter {
    /// Wrap an existing client
    pub fn new(client: impl ZipLookupClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Build the adapter from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(config: &ZipLookupConfig) -> Result<Self, ApplicationError> {
        let client = ZippopotamClient::new(config).map_err(|e| {
            ApplicationError::Configuration(format!("ZIP lookup client: {e}"))
        })?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl ZipLookupPort for ZipLookupAdapter {
    #[instrument(skip(self))]
    async fn lookup_zip(&self, zip: &str) -> Result<Option<ResolvedPlace>, ApplicationError> {
        match self.client.lookup(zip).await {
            Ok(place) => {
                debug!(place = %place.place_name, location = %place.location, "ZIP resolved");
                let label = match place.state {
                    Some(state) => format!("{}, {state}", place.place_name),
                    None => place.place_name,
                };
                Ok(Some(ResolvedPlace::at(place.location).with_label(label)))
            },
            Err(ZipLookupError::UnknownZip(_)) => Ok(None),
            Err(e) => {
                warn!(%zip, error = %e, "ZIP lookup failed");
                Err(ApplicationError::ExternalService(format!(
                    "ZIP lookup failed: {e}"
                )))
            },
        }
    }
}

/// Free-text geocoding through Nominatim
pub struct GeocodingAdapter {
    client: Box<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"GeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Wrap an existing client
    pub fn new(client: impl GeocodingClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Build the adapter from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        let client = NominatimGeocodingClient::new(config).map_err(|e| {
            ApplicationError::Configuration(format!("Geocoding client: {e}"))
        })?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Option<ResolvedPlace>, ApplicationError> {
        match self.client.geocode(query).await {
            Ok(place) => {
                let resolved = ResolvedPlace::at(place.location);
                Ok(Some(match place.display_name {
                    Some(name) => resolved.with_label(name),
                    None => resolved,
                }))
            },
            Err(e) if e.is_not_found() => {
                debug!(%query, "No geocoding match");
                Ok(None)
            },
            Err(e) => {
                warn!(%query, error = %e, "Geocoding failed");
                Err(ApplicationError::ExternalService(format!(
                    "Geocoding failed: {e}"
                )))
            },
        }
    }
}
