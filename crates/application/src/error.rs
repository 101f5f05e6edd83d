//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Requested item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }
}

/// Failures of a single search, each shown to the user with its own message
///
/// None of these is fatal: after any of them the surface returns to an
/// interactive idle state.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No location was entered
    #[error("Location input is empty")]
    EmptyInput,

    /// The trail dataset has not finished loading (or loaded nothing)
    #[error("Trail data is not loaded")]
    TrailsNotLoaded,

    /// Radius is negative or not a number
    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    /// ZIP lookup rejected the code
    #[error("Invalid ZIP code: {0}")]
    InvalidZip(String),

    /// Neither the full text nor its fallback could be geocoded
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// A lookup service could not be reached or answered with an error
    #[error("Lookup service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A newer search started before this one could render
    #[error("Search superseded by a newer search")]
    Superseded,

    /// The selected result entry does not exist
    #[error("No result at position {0}")]
    UnknownResult(usize),
}

impl SearchError {
    /// Message suitable for showing to the user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyInput => "Please enter a ZIP code or address.".to_string(),
            Self::TrailsNotLoaded => {
                "Trail data is still loading. Please try again in a moment.".to_string()
            },
            Self::InvalidRadius(_) => "Please enter a radius of zero miles or more.".to_string(),
            Self::InvalidZip(_) => "Invalid ZIP code".to_string(),
            Self::LocationNotFound(query) => {
                format!("Could not find \"{query}\". Try a city name or a ZIP code.")
            },
            Self::ServiceUnavailable(_) => {
                "The location service is unavailable. Please try again later.".to_string()
            },
            Self::Superseded => "A newer search replaced this one.".to_string(),
            Self::UnknownResult(_) => "That trail is no longer in the results.".to_string(),
        }
    }

    /// Whether the failure was raised before any network call
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::TrailsNotLoaded | Self::InvalidRadius(_)
        )
    }
}

impl From<DomainError> for SearchError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidRadius(value) => Self::InvalidRadius(value),
            other => Self::ServiceUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_distinct() {
        let errors = [
            SearchError::EmptyInput,
            SearchError::TrailsNotLoaded,
            SearchError::InvalidRadius("-1".to_string()),
            SearchError::InvalidZip("00000".to_string()),
            SearchError::LocationNotFound("Nowhere".to_string()),
            SearchError::ServiceUnavailable("HTTP 503".to_string()),
            SearchError::Superseded,
            SearchError::UnknownResult(3),
        ];
        let mut messages: Vec<String> = errors.iter().map(SearchError::user_message).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn loading_message_matches_surface_text() {
        assert_eq!(
            SearchError::TrailsNotLoaded.user_message(),
            "Trail data is still loading. Please try again in a moment."
        );
        assert_eq!(SearchError::InvalidZip("1".to_string()).user_message(), "Invalid ZIP code");
    }

    #[test]
    fn validation_classification() {
        assert!(SearchError::EmptyInput.is_validation());
        assert!(SearchError::TrailsNotLoaded.is_validation());
        assert!(!SearchError::InvalidZip("x".to_string()).is_validation());
        assert!(!SearchError::LocationNotFound("x".to_string()).is_validation());
    }

    #[test]
    fn domain_radius_error_maps_to_invalid_radius() {
        let err: SearchError = DomainError::InvalidRadius("NaN".to_string()).into();
        assert!(matches!(err, SearchError::InvalidRadius(v) if v == "NaN"));
    }

    #[test]
    fn application_error_retryable() {
        assert!(ApplicationError::ExternalService("x".to_string()).is_retryable());
        assert!(!ApplicationError::NotFound("x".to_string()).is_retryable());
    }
}
