//! Geographic location value object and great-circle distance

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean Earth radius used by the haversine formula, in statute miles
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Great-circle distance in miles between two latitude/longitude pairs
///
/// Uses the haversine formula. Inputs are not range-checked; the result is
/// always non-negative and symmetric in its two points.
#[must_use]
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = lat2_rad - lat1_rad;
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
        (delta_lon / 2.0).sin().powi(2),
        (delta_lat / 2.0).sin().powi(2),
    );
    // Rounding can push `a` a hair outside [0, 1] for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// A geographic location with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180] (NaN is rejected as well)
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a location from the decimal strings geocoding services return
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if either part is not a number or is out of range.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, InvalidCoordinates> {
        let lat = latitude.trim().parse::<f64>().map_err(|_| InvalidCoordinates)?;
        let lon = longitude.trim().parse::<f64>().map_err(|_| InvalidCoordinates)?;
        Self::new(lat, lon)
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another location in miles
    #[must_use]
    pub fn distance_miles(&self, other: &Self) -> f64 {
        distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let loc = GeoLocation::new(40.0, -75.0).expect("valid coordinates");
        assert!((loc.latitude() - 40.0).abs() < f64::EPSILON);
        assert!((loc.longitude() + 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
        assert!(GeoLocation::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, -181.0).is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_parse_strings() {
        let loc = GeoLocation::parse("39.9526", " -75.1652 ").expect("valid");
        assert!((loc.latitude() - 39.9526).abs() < 1e-9);
        assert!((loc.longitude() + 75.1652).abs() < 1e-9);
        assert!(GeoLocation::parse("north", "-75").is_err());
        assert!(GeoLocation::parse("", "").is_err());
    }

    #[test]
    fn test_display() {
        let loc = GeoLocation::new(40.05, -75.05).expect("valid");
        assert_eq!(loc.to_string(), "40.050000, -75.050000");
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        assert!(distance(40.0, -75.0, 40.0, -75.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_nearby_trail() {
        let d = distance(40.0, -75.0, 40.05, -75.05);
        assert!((d - 4.35).abs() < 0.1, "got {d}");
    }

    #[test]
    fn test_distance_far_trail() {
        let d = distance(40.0, -75.0, 41.0, -76.0);
        assert!(d > 80.0 && d < 90.0, "got {d}");
    }

    #[test]
    fn test_distance_antipodal_is_half_circumference() {
        let d = distance(0.0, 0.0, 0.0, 180.0);
        let half = std::f64::consts::PI * EARTH_RADIUS_MILES;
        assert!((d - half).abs() < 1e-6);
    }

    #[test]
    fn test_distance_miles_matches_free_function() {
        let a = GeoLocation::new(40.0, -75.0).expect("valid");
        let b = GeoLocation::new(41.0, -76.0).expect("valid");
        assert!((a.distance_miles(&b) - distance(40.0, -75.0, 41.0, -76.0)).abs() < 1e-12);
    }

    #[test]
    fn test_serialization() {
        let loc = GeoLocation::new(40.05, -75.05).expect("valid");
        let json = serde_json::to_string(&loc).expect("serialize");
        assert!(json.contains("\"latitude\":40.05"));
        let back: GeoLocation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(loc, back);
    }
}
