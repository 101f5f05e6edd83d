//! Configuration sections owned by the trail finder itself:
//! trail dataset, map presentation, device capabilities.

use application::ports::TileLayer;
use application::services::MapRendererConfig;
use serde::{Deserialize, Serialize};

use super::default_true;

// ==============================
// Trail Dataset Configuration
// ==============================

/// Where the trail dataset is loaded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailsConfig {
    /// Local JSON file path or `http(s)` URL
    #[serde(default = "default_trails_source")]
    pub source: String,

    /// Timeout for remote sources in seconds
    #[serde(default = "default_trails_timeout")]
    pub timeout_secs: u64,
}

fn default_trails_source() -> String {
    "trails.json".to_string()
}

const fn default_trails_timeout() -> u64 {
    30
}

impl Default for TrailsConfig {
    fn default() -> Self {
        Self {
            source: default_trails_source(),
            timeout_secs: default_trails_timeout(),
        }
    }
}

impl TrailsConfig {
    /// Whether the source is fetched over HTTP
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }

    /// Validate the section
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.source.trim().is_empty() {
            return Err("trails.source must not be empty".to_string());
        }
        if self.is_remote() {
            url::Url::parse(&self.source)
                .map_err(|e| format!("trails.source is not a valid URL: {e}"))?;
        }
        if self.timeout_secs == 0 {
            return Err("trails.timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}

// ==============================
// Map Configuration
// ==============================

/// Map presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapAppConfig {
    /// Zoom level when centering on a search origin (0-19)
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,

    /// Tile URL template
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    /// Tile attribution text
    #[serde(default = "default_attribution")]
    pub attribution: String,

    /// Duration of the focus bounce in milliseconds
    #[serde(default = "default_bounce_ms")]
    pub bounce_ms: u64,
}

const fn default_zoom() -> u8 {
    10
}

fn default_tile_url() -> String {
    TileLayer::default().url_template
}

fn default_attribution() -> String {
    TileLayer::default().attribution
}

const fn default_bounce_ms() -> u64 {
    700
}

impl Default for MapAppConfig {
    fn default() -> Self {
        Self {
            default_zoom: default_zoom(),
            tile_url: default_tile_url(),
            attribution: default_attribution(),
            bounce_ms: default_bounce_ms(),
        }
    }
}

impl MapAppConfig {
    /// Highest zoom level served by standard tile providers
    pub const MAX_ZOOM: u8 = 19;

    /// Renderer settings derived from this section
    #[must_use]
    pub fn to_renderer_config(&self) -> MapRendererConfig {
        MapRendererConfig {
            default_zoom: self.default_zoom,
            focus_emphasis_ms: self.bounce_ms,
            tiles: TileLayer {
                url_template: self.tile_url.clone(),
                attribution: self.attribution.clone(),
            },
        }
    }

    /// Validate the section
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_zoom > Self::MAX_ZOOM {
            return Err(format!(
                "map.default_zoom must be at most {}, got {}",
                Self::MAX_ZOOM,
                self.default_zoom
            ));
        }
        let has_placeholders = ["{z}", "{x}", "{y}"]
            .iter()
            .all(|placeholder| self.tile_url.contains(placeholder));
        if !has_placeholders {
            return Err("map.tile_url must contain {z}, {x} and {y} placeholders".to_string());
        }
        Ok(())
    }
}

// ==============================
// Device Configuration
// ==============================

/// Input capabilities of the display device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Whether the pointer can hover (false on touch-only devices)
    #[serde(default = "default_true")]
    pub supports_hover: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            supports_hover: true,
        }
    }
}
