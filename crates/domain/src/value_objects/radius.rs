//! Search radius value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Search radius in miles
///
/// Always finite and non-negative.
///
/// # Examples
///
/// ```
/// use domain::value_objects::Radius;
///
/// let r: Radius = "10".parse().expect("valid radius");
/// assert!(r.contains(9.99));
/// assert!(r.contains(10.0));
/// assert!(!r.contains(10.01));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Radius(f64);

impl Radius {
    /// Create a validated radius
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRadius` for negative, infinite or NaN values.
    pub fn new(miles: f64) -> Result<Self, DomainError> {
        if !miles.is_finite() || miles < 0.0 {
            return Err(DomainError::InvalidRadius(miles.to_string()));
        }
        Ok(Self(miles))
    }

    /// Radius in miles
    #[must_use]
    pub const fn miles(&self) -> f64 {
        self.0
    }

    /// Whether a distance in miles lies within the radius (inclusive)
    #[must_use]
    pub fn contains(&self, distance_miles: f64) -> bool {
        distance_miles <= self.0
    }
}

impl TryFrom<f64> for Radius {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Radius> for f64 {
    fn from(value: Radius) -> Self {
        value.0
    }
}

impl FromStr for Radius {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let miles = s
            .trim()
            .parse::<f64>()
            .map_err(|_| DomainError::InvalidRadius(s.to_string()))?;
        Self::new(miles)
    }
}

impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mi", self.0)
    }
}
