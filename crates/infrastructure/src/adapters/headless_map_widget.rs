//! Headless map widget - records map state for inspection and HTML export
//!
//! Behaves like a tile-map widget without drawing anything: a single popup
//! can be open at a time, panning moves the center, and markers keep their
//! insertion order.

use std::collections::BTreeMap;
use std::time::Duration;

use application::ports::{MapWidgetPort, MarkerIcon, MarkerId, MarkerPopup, MarkerSpec, TileLayer};
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, trace, warn};

/// A marker as currently shown on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMarker {
    /// Marker handle
    pub id: MarkerId,
    /// Position
    pub location: GeoLocation,
    /// Current icon
    pub icon: MarkerIcon,
    /// Popup content
    pub popup: Option<MarkerPopup>,
    /// Hover label
    pub tooltip: Option<String>,
    /// Whether the popup is open
    pub popup_open: bool,
}

/// Point-in-time copy of the widget state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSnapshot {
    /// Whether the widget has been created
    pub created: bool,
    /// How many times `create` was called
    pub creations: u32,
    /// Current center
    pub center: Option<GeoLocation>,
    /// Current zoom level
    pub zoom: u8,
    /// Tile source
    pub tiles: TileLayer,
    /// Markers in placement order
    pub markers: Vec<PlacedMarker>,
    /// How many layout recomputations were requested
    pub size_invalidations: u32,
}

impl MapSnapshot {
    /// Marker with the given handle
    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<&PlacedMarker> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Marker whose popup is open, if any
    #[must_use]
    pub fn open_popup(&self) -> Option<&PlacedMarker> {
        self.markers.iter().find(|m| m.popup_open)
    }
}

#[derive(Debug, Default)]
struct WidgetState {
    created: bool,
    creations: u32,
    center: Option<GeoLocation>,
    zoom: u8,
    tiles: TileLayer,
    next_id: u64,
    markers: BTreeMap<MarkerId, PlacedMarker>,
    size_invalidations: u32,
}

/// In-memory map widget
#[derive(Debug, Default)]
pub struct HeadlessMapWidget {
    state: Mutex<WidgetState>,
    pan_duration: Duration,
}

impl HeadlessMapWidget {
    /// Create a widget whose pans complete immediately
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate pan animations lasting `duration`
    #[must_use]
    pub fn with_pan_duration(mut self, duration: Duration) -> Self {
        self.pan_duration = duration;
        self
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> MapSnapshot {
        let state = self.state.lock();
        MapSnapshot {
            created: state.created,
            creations: state.creations,
            center: state.center,
            zoom: state.zoom,
            tiles: state.tiles.clone(),
            markers: state.markers.values().cloned().collect(),
            size_invalidations: state.size_invalidations,
        }
    }
}

#[async_trait]
impl MapWidgetPort for HeadlessMapWidget {
    fn create(&self, center: GeoLocation, zoom: u8, tiles: &TileLayer) {
        let mut state = self.state.lock();
        if state.created {
            warn!("Map widget created twice");
        }
        state.created = true;
        state.creations += 1;
        state.center = Some(center);
        state.zoom = zoom;
        state.tiles = tiles.clone();
        debug!(%center, zoom, "Map created");
    }

    fn set_view(&self, center: GeoLocation, zoom: u8) {
        let mut state = self.state.lock();
        state.center = Some(center);
        state.zoom = zoom;
    }

    fn add_marker(&self, spec: MarkerSpec) -> MarkerId {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = MarkerId::new(state.next_id);
        state.markers.insert(
            id,
            PlacedMarker {
                id,
                location: spec.location,
                icon: spec.icon,
                popup: spec.popup,
                tooltip: spec.tooltip,
                popup_open: false,
            },
        );
        trace!(%id, "Marker added");
        id
    }

    fn remove_marker(&self, id: MarkerId) {
        if self.state.lock().markers.remove(&id).is_none() {
            trace!(%id, "Ignoring removal of unknown marker");
        }
    }

    fn open_popup(&self, id: MarkerId) {
        let mut state = self.state.lock();
        if !state.markers.contains_key(&id) {
            return;
        }
        for marker in state.markers.values_mut() {
            marker.popup_open = marker.id == id && marker.popup.is_some();
        }
    }

    fn set_marker_icon(&self, id: MarkerId, icon: MarkerIcon) {
        if let Some(marker) = self.state.lock().markers.get_mut(&id) {
            marker.icon = icon;
        }
    }

    async fn pan_to(&self, center: GeoLocation) {
        if !self.pan_duration.is_zero() {
            tokio::time::sleep(self.pan_duration).await;
        }
        self.state.lock().center = Some(center);
    }

    fn invalidate_size(&self) {
        self.state.lock().size_invalidations += 1;
    }
}
