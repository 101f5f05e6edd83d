//! Location resolver
//!
//! Turns user input into search-origin coordinates. ZIP codes go to the ZIP
//! lookup; everything else goes to the free-text geocoder, with one coarser
//! retry using the text after the first comma.
//!
//! Free-text geocoders are unreliable for full street addresses. Retrying
//! with the city/region part finds something far more often, but the origin
//! may then be a city centroid rather than the street address entered.

use std::{fmt, sync::Arc};

use domain::value_objects::{GeoLocation, LocationQuery};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    error::{ApplicationError, SearchError},
    ports::{GeocodingPort, ResolvedPlace, ZipLookupPort},
};

/// A search origin and how it was found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedOrigin {
    /// Origin coordinates
    pub location: GeoLocation,
    /// Name the lookup service gave the place
    pub label: Option<String>,
    /// Text that was actually resolved (the fallback when one was used)
    pub resolved_query: String,
    /// Whether the comma fallback produced this origin
    pub via_fallback: bool,
}

impl ResolvedOrigin {
    fn from_place(place: ResolvedPlace, resolved_query: &str, via_fallback: bool) -> Self {
        Self {
            location: place.location,
            label: place.label,
            resolved_query: resolved_query.to_string(),
            via_fallback,
        }
    }
}

/// Resolves ZIP codes and free text to coordinates
pub struct LocationResolver {
    zip_lookup: Arc<dyn ZipLookupPort>,
    geocoder: Arc<dyn GeocodingPort>,
}

impl fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationResolver").finish_non_exhaustive()
    }
}

impl LocationResolver {
    /// Create a resolver over the two lookup ports
    pub fn new(zip_lookup: Arc<dyn ZipLookupPort>, geocoder: Arc<dyn GeocodingPort>) -> Self {
        Self {
            zip_lookup,
            geocoder,
        }
    }

    /// Resolve raw user input
    ///
    /// Empty input fails with `EmptyInput` without touching the network.
    pub async fn resolve_input(&self, input: &str) -> Result<ResolvedOrigin, SearchError> {
        let query = LocationQuery::parse(input).ok_or(SearchError::EmptyInput)?;
        self.resolve(&query).await
    }

    /// Resolve a classified query
    #[instrument(skip(self), fields(query = %query))]
    pub async fn resolve(&self, query: &LocationQuery) -> Result<ResolvedOrigin, SearchError> {
        match query {
            LocationQuery::Zip(zip) => self.resolve_zip(zip).await,
            LocationQuery::FreeText(text) => self.resolve_text(query, text).await,
        }
    }

    async fn resolve_zip(&self, zip: &str) -> Result<ResolvedOrigin, SearchError> {
        let place = self
            .zip_lookup
            .lookup_zip(zip)
            .await
            .map_err(unavailable)?
            .ok_or_else(|| SearchError::InvalidZip(zip.to_string()))?;

        debug!(%zip, location = %place.location, "ZIP code resolved");
        Ok(ResolvedOrigin::from_place(place, zip, false))
    }

    async fn resolve_text(
        &self,
        query: &LocationQuery,
        text: &str,
    ) -> Result<ResolvedOrigin, SearchError> {
        if let Some(place) = self.geocoder.geocode(text).await.map_err(unavailable)? {
            debug!(location = %place.location, "Address resolved");
            return Ok(ResolvedOrigin::from_place(place, text, false));
        }

        let Some(fallback) = query.fallback() else {
            return Err(SearchError::LocationNotFound(text.to_string()));
        };

        info!(%fallback, "No match for full address, retrying with city/region");
        let place = self
            .geocoder
            .geocode(fallback)
            .await
            .map_err(unavailable)?
            .ok_or_else(|| SearchError::LocationNotFound(text.to_string()))?;

        debug!(location = %place.location, "Fallback resolved");
        Ok(ResolvedOrigin::from_place(place, fallback, true))
    }
}

fn unavailable(err: ApplicationError) -> SearchError {
    SearchError::ServiceUnavailable(err.to_string())
}
