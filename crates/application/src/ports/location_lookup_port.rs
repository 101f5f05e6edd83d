//! Location lookup ports
//!
//! Two lookups back the location resolver: a ZIP code service and a
//! free-text geocoder. Both report "no match" as `Ok(None)` and reserve
//! errors for services that could not answer.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A location returned by a lookup service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    /// Coordinates of the place
    pub location: GeoLocation,
    /// Name the service gave the place, if any
    pub label: Option<String>,
}

impl ResolvedPlace {
    /// Create a place without a label
    #[must_use]
    pub const fn at(location: GeoLocation) -> Self {
        Self {
            location,
            label: None,
        }
    }

    /// Attach a label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Port for resolving US ZIP codes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ZipLookupPort: Send + Sync {
    /// Look up a five-digit ZIP code; `None` when the service rejects it
    async fn lookup_zip(&self, zip: &str) -> Result<Option<ResolvedPlace>, ApplicationError>;
}

/// Port for free-text geocoding
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Geocode an address or place name; `None` when nothing matches
    async fn geocode(&self, query: &str) -> Result<Option<ResolvedPlace>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traits_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ZipLookupPort>();
        assert_send_sync::<dyn GeocodingPort>();
    }

    #[test]
    fn resolved_place_builder() {
        let loc = GeoLocation::new(39.8, -89.6).unwrap();
        let place = ResolvedPlace::at(loc).with_label("Springfield");
        assert_eq!(place.location, loc);
        assert_eq!(place.label.as_deref(), Some("Springfield"));
    }
}
