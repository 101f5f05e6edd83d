//! Lookup error types

use thiserror::Error;

/// Errors that can occur during free-text geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Address could not be resolved to coordinates
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

impl GeocodingError {
    /// Returns true if the service answered but had no match
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::AddressNotFound(_))
    }
}

/// Errors that can occur during ZIP code lookup
#[derive(Debug, Error)]
pub enum ZipLookupError {
    /// The service does not know this ZIP code
    #[error("Unknown ZIP code: {0}")]
    UnknownZip(String),

    /// Connection to the lookup service failed
    #[error("ZIP lookup connection failed: {0}")]
    ConnectionFailed(String),

    /// Failed to parse lookup response
    #[error("ZIP lookup parse error: {0}")]
    ParseError(String),

    /// Request timeout
    #[error("ZIP lookup timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl ZipLookupError {
    /// Returns true if the ZIP code itself was rejected
    #[must_use]
    pub const fn is_unknown_zip(&self) -> bool {
        matches!(self, Self::UnknownZip(_))
    }
}
