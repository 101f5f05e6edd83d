//! Trail record as it appears in the trail dataset

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// A hiking trail from the static dataset
///
/// Field names accept both the snake_case and the camelCase spellings found
/// in published datasets (`full_address`, `mapLink`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    /// Display name
    pub name: String,

    /// Human-readable address
    #[serde(default, alias = "full_address", alias = "fullAddress")]
    pub address: String,

    /// Outbound maps link, usually embedding `@lat,lng`
    #[serde(default, alias = "mapLink", alias = "directions")]
    pub map_link: Option<String>,

    /// Precomputed latitude
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,

    /// Precomputed longitude
    #[serde(default, alias = "lng", alias = "lon")]
    pub longitude: Option<f64>,
}

impl Trail {
    /// Create a trail with an address and nothing else
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            map_link: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Attach a maps link
    #[must_use]
    pub fn with_map_link(mut self, link: impl Into<String>) -> Self {
        self.map_link = Some(link.into());
        self
    }

    /// Attach precomputed coordinates
    #[must_use]
    pub const fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Resolve the trail's position without any network lookup
    ///
    /// Precomputed coordinates win; otherwise the `@lat,lng` pair embedded in
    /// the maps link is used. `None` means the trail cannot be placed.
    #[must_use]
    pub fn location(&self) -> Option<GeoLocation> {
        if let (Some(lat), Some(lon)) = (self.latitude, self.longitude) {
            if let Ok(loc) = GeoLocation::new(lat, lon) {
                return Some(loc);
            }
        }

        self.map_link.as_deref().and_then(coordinates_from_link)
    }

    /// Link for turn-by-turn directions to the trail
    ///
    /// The dataset's maps link when present, else a link built from the
    /// resolved coordinates.
    #[must_use]
    pub fn directions_link(&self) -> Option<String> {
        if let Some(link) = self.map_link.as_deref().filter(|l| !l.trim().is_empty()) {
            return Some(link.to_string());
        }

        self.location().map(|loc| {
            format!(
                "https://maps.google.com/maps?q={},{}",
                loc.latitude(),
                loc.longitude()
            )
        })
    }
}

/// Extract the first valid `@lat,lng` pair from a maps link
///
/// Anything after the longitude (zoom suffixes like `,15z`, path segments)
/// is ignored.
///
/// # Examples
///
/// ```
/// use domain::entities::coordinates_from_link;
///
/// let loc = coordinates_from_link("https://www.google.com/maps/place/X/@39.95,-75.16,15z")
///     .expect("embedded coordinates");
/// assert!((loc.latitude() - 39.95).abs() < 1e-9);
/// assert!(coordinates_from_link("https://example.com/trail").is_none());
/// ```
#[must_use]
pub fn coordinates_from_link(link: &str) -> Option<GeoLocation> {
    link.split('@').skip(1).find_map(|segment| {
        let end = segment
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | ',')))
            .unwrap_or(segment.len());
        let mut parts = segment[..end].split(',');
        let lat = parts.next()?;
        let lon = parts.next()?;
        GeoLocation::parse(lat, lon).ok()
    })
}
