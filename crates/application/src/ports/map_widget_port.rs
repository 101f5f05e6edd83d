//! Map widget port
//!
//! The interactive map is an external capability (a tile-based map library
//! in the browser, a headless recorder in tests and the CLI). The map
//! renderer drives it exclusively through this trait.

use std::fmt;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Handle of a marker placed on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(u64);

impl MarkerId {
    /// Wrap a raw marker handle
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw handle value
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

/// Visual state of a marker icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerIcon {
    /// Distinguished icon for the search origin
    User,
    /// Resting trail icon
    Trail,
    /// Trail icon during the one-shot bounce emphasis
    TrailBouncing,
}

/// Popup content bound to a marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerPopup {
    /// Bold heading line
    pub title: String,
    /// Secondary text (e.g. the address)
    pub body: Option<String>,
    /// Outbound link URL
    pub link: Option<String>,
}

impl MarkerPopup {
    /// Popup with a title only
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            link: None,
        }
    }
}

/// Everything needed to place one marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    /// Marker position
    pub location: GeoLocation,
    /// Initial icon
    pub icon: MarkerIcon,
    /// Popup shown on click
    pub popup: Option<MarkerPopup>,
    /// Label shown on hover
    pub tooltip: Option<String>,
}

/// Tile source for the map background
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    /// URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders
    pub url_template: String,
    /// Attribution text required by the tile provider
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
        }
    }
}

/// Port for the interactive map widget
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MapWidgetPort: Send + Sync {
    /// Create the widget centered on a location with a tile layer
    fn create(&self, center: GeoLocation, zoom: u8, tiles: &TileLayer);

    /// Reposition an existing widget
    fn set_view(&self, center: GeoLocation, zoom: u8);

    /// Add a marker and return its handle
    fn add_marker(&self, spec: MarkerSpec) -> MarkerId;

    /// Remove a marker; unknown handles are ignored
    fn remove_marker(&self, id: MarkerId);

    /// Open the popup bound to a marker
    fn open_popup(&self, id: MarkerId);

    /// Swap a marker's icon
    fn set_marker_icon(&self, id: MarkerId, icon: MarkerIcon);

    /// Pan to a location; resolves once the pan has finished
    async fn pan_to(&self, center: GeoLocation);

    /// Recompute the widget layout after its container changed size or visibility
    fn invalidate_size(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn MapWidgetPort>();
    }

    #[test]
    fn marker_id_display() {
        assert_eq!(MarkerId::new(7).to_string(), "marker-7");
        assert_eq!(MarkerId::new(7).value(), 7);
    }

    #[test]
    fn default_tiles_are_openstreetmap() {
        let tiles = TileLayer::default();
        assert!(tiles.url_template.contains("tile.openstreetmap.org"));
    }

    #[test]
    fn icon_serializes_snake_case() {
        let json = serde_json::to_string(&MarkerIcon::TrailBouncing).unwrap();
        assert_eq!(json, "\"trail_bouncing\"");
    }
}
