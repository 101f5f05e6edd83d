//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude ranges
    #[error("Invalid coordinates: {latitude}, {longitude}")]
    InvalidCoordinates {
        /// Offending latitude
        latitude: f64,
        /// Offending longitude
        longitude: f64,
    },

    /// Radius is negative or not a finite number
    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_coordinates_message() {
        let err = DomainError::InvalidCoordinates {
            latitude: 91.0,
            longitude: 0.0,
        };
        assert_eq!(err.to_string(), "Invalid coordinates: 91, 0");
    }

    #[test]
    fn invalid_radius_message() {
        let err = DomainError::InvalidRadius("-3".to_string());
        assert_eq!(err.to_string(), "Invalid radius: -3");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("name is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: name is required");
    }
}
