//! Lookup result models and raw API payloads

use domain::value_objects::GeoLocation;
use serde::{Deserialize, Serialize};

/// A place returned by the ZIP lookup service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipPlace {
    /// ZIP code that was looked up
    pub zip: String,
    /// Place name (city)
    pub place_name: String,
    /// State abbreviation, if reported
    pub state: Option<String>,
    /// Representative coordinates
    pub location: GeoLocation,
}

/// A candidate returned by the free-text geocoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    /// Query that produced this candidate
    pub query: String,
    /// Human-readable name reported by the geocoder
    pub display_name: Option<String>,
    /// Candidate coordinates
    pub location: GeoLocation,
}

/// Raw Zippopotam.us response
#[derive(Debug, Deserialize)]
pub(crate) struct RawZipResponse {
    #[serde(default)]
    pub places: Vec<RawZipPlace>,
}

/// Raw Zippopotam.us place entry (coordinates are strings)
#[derive(Debug, Deserialize)]
pub(crate) struct RawZipPlace {
    #[serde(rename = "place name", default)]
    pub place_name: String,
    #[serde(rename = "state abbreviation", default)]
    pub state_abbreviation: Option<String>,
    pub latitude: String,
    pub longitude: String,
}

/// Raw Nominatim search result
#[derive(Debug, Deserialize)]
pub(crate) struct NominatimResult {
    pub lat: String,
    pub lon: String,
    pub display_name: Option<String>,
}
