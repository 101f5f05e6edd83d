//! Map renderer
//!
//! Owns the single map widget and every marker on it. The widget is created
//! on the first search and only repositioned afterwards; markers are cleared
//! and rebuilt on every search so the map always shows exactly the current
//! results plus the user marker.

use std::{fmt, sync::Arc, time::Duration};

use domain::entities::Trail;
use domain::value_objects::GeoLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{
        DeviceCapabilityPort, MapWidgetPort, MarkerIcon, MarkerId, MarkerPopup, MarkerSpec,
        TileLayer,
    },
};

/// Default zoom level when centering on a search origin
const DEFAULT_ZOOM: u8 = 10;

/// Default length of the focus bounce in milliseconds
const DEFAULT_FOCUS_EMPHASIS_MS: u64 = 700;

/// Map renderer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapRendererConfig {
    /// Zoom level used when centering on a search origin
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,

    /// How long a focused marker bounces before returning to rest
    #[serde(default = "default_focus_emphasis_ms")]
    pub focus_emphasis_ms: u64,

    /// Tile source
    #[serde(default)]
    pub tiles: TileLayer,
}

const fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

const fn default_focus_emphasis_ms() -> u64 {
    DEFAULT_FOCUS_EMPHASIS_MS
}

impl Default for MapRendererConfig {
    fn default() -> Self {
        Self {
            default_zoom: default_zoom(),
            focus_emphasis_ms: default_focus_emphasis_ms(),
            tiles: TileLayer::default(),
        }
    }
}

impl MapRendererConfig {
    /// Focus bounce duration
    #[must_use]
    pub const fn focus_emphasis(&self) -> Duration {
        Duration::from_millis(self.focus_emphasis_ms)
    }
}

#[derive(Debug, Clone)]
struct PlacedTrail {
    id: MarkerId,
    trail: Trail,
    location: GeoLocation,
}

/// Drives the map widget for the search orchestrator
pub struct MapRenderer {
    widget: Arc<dyn MapWidgetPort>,
    device: Arc<dyn DeviceCapabilityPort>,
    config: MapRendererConfig,
    created: bool,
    user_marker: Option<MarkerId>,
    trail_markers: Vec<PlacedTrail>,
}

impl fmt::Debug for MapRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapRenderer")
            .field("config", &self.config)
            .field("created", &self.created)
            .field("markers", &self.marker_count())
            .finish_non_exhaustive()
    }
}

impl MapRenderer {
    /// Create a renderer; the widget itself is created lazily
    pub fn new(
        widget: Arc<dyn MapWidgetPort>,
        device: Arc<dyn DeviceCapabilityPort>,
        config: MapRendererConfig,
    ) -> Self {
        Self {
            widget,
            device,
            config,
            created: false,
            user_marker: None,
            trail_markers: Vec::new(),
        }
    }

    /// Renderer settings
    #[must_use]
    pub const fn config(&self) -> &MapRendererConfig {
        &self.config
    }

    /// Whether the widget exists yet
    #[must_use]
    pub const fn is_created(&self) -> bool {
        self.created
    }

    /// Create the widget on first use, reposition it afterwards
    #[instrument(skip(self), fields(center = %center))]
    pub fn ensure_map_centered_at(&mut self, center: GeoLocation, zoom: u8) {
        if self.created {
            debug!("Repositioning map");
            self.widget.set_view(center, zoom);
        } else {
            debug!("Creating map");
            self.widget.create(center, zoom, &self.config.tiles);
            self.created = true;
        }
    }

    /// Center on a location at the configured default zoom
    pub fn center_on(&mut self, center: GeoLocation) {
        self.ensure_map_centered_at(center, self.config.default_zoom);
    }

    /// Remove every marker, user marker included; the widget stays
    pub fn clear_trail_markers(&mut self) {
        let removed = self.marker_count();
        if let Some(id) = self.user_marker.take() {
            self.widget.remove_marker(id);
        }
        for placed in self.trail_markers.drain(..) {
            self.widget.remove_marker(placed.id);
        }
        debug!(removed, "Cleared markers");
    }

    /// Place the distinguished search-origin marker with its popup open
    pub fn place_user_marker(&mut self, location: GeoLocation) -> MarkerId {
        if let Some(previous) = self.user_marker.take() {
            self.widget.remove_marker(previous);
        }

        let id = self.widget.add_marker(MarkerSpec {
            location,
            icon: MarkerIcon::User,
            popup: Some(MarkerPopup::titled("You are here")),
            tooltip: None,
        });
        self.widget.open_popup(id);
        self.user_marker = Some(id);
        id
    }

    /// Place a trail marker with its popup and, on hover devices, a tooltip
    pub fn place_trail_marker(&mut self, trail: &Trail, location: GeoLocation) -> MarkerId {
        let tooltip = (!self.is_touch_device()).then(|| trail.name.clone());
        let popup = MarkerPopup {
            title: trail.name.clone(),
            body: (!trail.address.is_empty()).then(|| trail.address.clone()),
            link: trail.directions_link(),
        };

        let id = self.widget.add_marker(MarkerSpec {
            location,
            icon: MarkerIcon::Trail,
            popup: Some(popup),
            tooltip,
        });
        self.trail_markers.push(PlacedTrail {
            id,
            trail: trail.clone(),
            location,
        });
        id
    }

    /// Pan to a trail marker, open its popup and bounce it briefly
    ///
    /// The popup opens only after panning completes. The marker returns to
    /// its resting icon once the emphasis duration has elapsed.
    #[instrument(skip(self))]
    pub async fn focus_marker(&self, marker: MarkerId) -> Result<MarkerId, ApplicationError> {
        let placed = self
            .trail_markers
            .iter()
            .find(|p| p.id == marker)
            .ok_or_else(|| ApplicationError::NotFound(format!("trail marker {marker}")))?;

        self.widget.pan_to(placed.location).await;
        self.widget.open_popup(placed.id);
        self.widget.set_marker_icon(placed.id, MarkerIcon::TrailBouncing);
        tokio::time::sleep(self.config.focus_emphasis()).await;
        self.widget.set_marker_icon(placed.id, MarkerIcon::Trail);

        debug!(marker = %placed.id, trail = %placed.trail.name, "Focused marker");
        Ok(placed.id)
    }

    /// Whether the user's device lacks hover (touch-first)
    #[must_use]
    pub fn is_touch_device(&self) -> bool {
        !self.device.supports_hover()
    }

    /// Recompute widget layout, e.g. after its region became visible
    pub fn invalidate_size(&self) {
        if self.created {
            self.widget.invalidate_size();
        }
    }

    /// Markers currently on the map, user marker included
    #[must_use]
    pub fn marker_count(&self) -> usize {
        usize::from(self.user_marker.is_some()) + self.trail_markers.len()
    }

    /// Handle of the trail marker for a trail, if placed
    #[must_use]
    pub fn marker_for(&self, trail: &Trail) -> Option<MarkerId> {
        self.trail_markers
            .iter()
            .find(|p| &p.trail == trail)
            .map(|p| p.id)
    }
}
