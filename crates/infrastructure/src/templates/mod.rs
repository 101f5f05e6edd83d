//! Map page export
//!
//! Renders a standalone Leaflet page from a [`MapSnapshot`] and the result
//! list. The page reproduces the search view: the map with its markers and
//! popups, hover tooltips when enabled, and a result list whose entries pan
//! to and bounce their marker.
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::templates::{MapPage, MapPageRenderer};
//!
//! let renderer = MapPageRenderer::new()?;
//! let html = renderer.render(&MapPage::new("Trails near 19103", widget.snapshot()))?;
//! ```

use std::fmt;
use std::path::Path;

use application::ports::TileLayer;
use application::services::ResultEntry;
use domain::value_objects::GeoLocation;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, info};

use crate::adapters::{MapSnapshot, PlacedMarker};

const PAGE_TEMPLATE: &str = "map/page.html";

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),

    /// Page data could not be serialized
    #[error("Invalid page data: {0}")]
    Data(String),

    /// Output file could not be written
    #[error("Failed to write {path}: {message}")]
    Write {
        /// Output path
        path: String,
        /// Underlying error
        message: String,
    },
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// One row of the exported result list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageEntry {
    /// Trail name
    pub name: String,
    /// Trail address
    pub address: String,
    /// Distance label, e.g. "4.4 mi"
    pub distance: String,
    /// Outbound directions link
    pub directions: Option<String>,
    /// Marker the entry focuses
    pub marker: u64,
}

impl From<&ResultEntry> for PageEntry {
    fn from(entry: &ResultEntry) -> Self {
        Self {
            name: entry.trail.name.clone(),
            address: entry.trail.address.clone(),
            distance: format!("{:.1} mi", entry.distance_miles),
            directions: entry.directions_link.clone(),
            marker: entry.marker.value(),
        }
    }
}

/// Everything shown on an exported page
#[derive(Debug, Clone, Serialize)]
pub struct MapPage {
    /// Page heading
    pub title: String,
    /// Map state to draw
    pub map: MapSnapshot,
    /// Result list
    pub entries: Vec<PageEntry>,
    /// Show the "no trails found" indicator
    pub no_results: bool,
    /// Show marker names on hover
    pub hover_tooltips: bool,
    /// Bounce length when an entry is selected
    pub bounce_ms: u64,
}

impl MapPage {
    /// Page with an empty result list
    pub fn new(title: impl Into<String>, map: MapSnapshot) -> Self {
        Self {
            title: title.into(),
            map,
            entries: Vec::new(),
            no_results: false,
            hover_tooltips: true,
            bounce_ms: 700,
        }
    }

    /// Attach the result list
    #[must_use]
    pub fn with_entries(mut self, entries: &[ResultEntry]) -> Self {
        self.entries = entries.iter().map(PageEntry::from).collect();
        self
    }

    /// Show the "no trails found" indicator
    #[must_use]
    pub const fn with_no_results(mut self, no_results: bool) -> Self {
        self.no_results = no_results;
        self
    }

    /// Enable or disable hover tooltips
    #[must_use]
    pub const fn with_hover_tooltips(mut self, enabled: bool) -> Self {
        self.hover_tooltips = enabled;
        self
    }

    /// Set the bounce length
    #[must_use]
    pub const fn with_bounce_ms(mut self, bounce_ms: u64) -> Self {
        self.bounce_ms = bounce_ms;
        self
    }
}

/// Embedded templates - compiled into the binary
mod embedded {
    pub const MAP_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{{ title }}</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
    <style>
        body { margin: 0; font-family: Arial, sans-serif; display: flex; height: 100vh; }
        #results { width: 320px; overflow-y: auto; padding: 12px; box-sizing: border-box; }
        #map { flex: 1; }
        .trail { padding: 8px 0; border-bottom: 1px solid #ddd; cursor: pointer; }
        .trail h3 { margin: 0 0 4px; font-size: 1em; }
        .distance { color: #666; }
        .empty { color: #a00; }
        .bouncing { animation: bounce 0.35s ease-in-out infinite; }
        @keyframes bounce { 50% { margin-top: -58px; } }
    </style>
</head>
<body>
    <div id="results">
        <h2>{{ title }}</h2>
        {% if no_results %}
        <p class="empty">No trails found within this radius.</p>
        {% endif %}
        {% for entry in entries %}
        <div class="trail" data-marker="{{ entry.marker }}">
            <h3>{{ entry.name }}</h3>
            <div>{{ entry.address }}</div>
            <div class="distance">{{ entry.distance }}</div>
            {% if entry.directions %}<a href="{{ entry.directions }}" target="_blank" rel="noopener">Directions</a>{% endif %}
        </div>
        {% endfor %}
    </div>
    <div id="map"></div>
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script>
        const state = {{ state_json | safe }};
        const map = L.map("map");
        if (state.center) {
            map.setView([state.center.latitude, state.center.longitude], state.zoom);
        }
        L.tileLayer(state.tiles.url_template, { attribution: state.tiles.attribution }).addTo(map);

        const userIcon = L.divIcon({ className: "user-marker", html: "&#9679;", iconSize: [18, 18] });
        const markers = new Map();

        function popupContent(popup) {
            const root = document.createElement("div");
            const title = document.createElement("b");
            title.textContent = popup.title;
            root.appendChild(title);
            if (popup.body) {
                root.appendChild(document.createElement("br"));
                root.appendChild(document.createTextNode(popup.body));
            }
            if (popup.link) {
                const link = document.createElement("a");
                link.href = popup.link;
                link.target = "_blank";
                link.rel = "noopener";
                link.textContent = "Directions";
                root.appendChild(document.createElement("br"));
                root.appendChild(link);
            }
            return root;
        }

        for (const m of state.markers) {
            const options = m.icon === "user" ? { icon: userIcon } : {};
            const marker = L.marker([m.location.latitude, m.location.longitude], options).addTo(map);
            if (m.popup) {
                marker.bindPopup(popupContent(m.popup));
            }
            if (m.tooltip && state.hover_tooltips) {
                marker.bindTooltip(m.tooltip);
            }
            if (m.popup_open) {
                marker.openPopup();
            }
            markers.set(m.id, marker);
        }

        function focusMarker(id) {
            const marker = markers.get(id);
            if (!marker) {
                return;
            }
            map.once("moveend", () => {
                marker.openPopup();
                const el = marker.getElement();
                if (el) {
                    el.classList.add("bouncing");
                    setTimeout(() => el.classList.remove("bouncing"), state.bounce_ms);
                }
            });
            map.panTo(marker.getLatLng());
        }

        document.querySelectorAll(".trail").forEach((row) => {
            row.addEventListener("click", (event) => {
                if (event.target.tagName !== "A") {
                    focusMarker(Number(row.dataset.marker));
                }
            });
        });
    </script>
</body>
</html>
"#;
}

#[derive(Serialize)]
struct ScriptState<'a> {
    center: Option<GeoLocation>,
    zoom: u8,
    tiles: &'a TileLayer,
    markers: &'a [PlacedMarker],
    hover_tooltips: bool,
    bounce_ms: u64,
}

/// Renders exported map pages
pub struct MapPageRenderer {
    tera: Tera,
}

impl fmt::Debug for MapPageRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapPageRenderer")
            .field("templates", &self.tera.get_template_names().count())
            .finish()
    }
}

impl MapPageRenderer {
    /// Compile the embedded page template
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to compile.
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_template(PAGE_TEMPLATE, embedded::MAP_PAGE)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;
        debug!("Map page template compiled");
        Ok(Self { tera })
    }

    /// Render a page to HTML
    ///
    /// # Errors
    ///
    /// Returns an error if the page data cannot be serialized or rendered.
    pub fn render(&self, page: &MapPage) -> Result<String, TemplateError> {
        let state = ScriptState {
            center: page.map.center,
            zoom: page.map.zoom,
            tiles: &page.map.tiles,
            markers: &page.map.markers,
            hover_tooltips: page.hover_tooltips,
            bounce_ms: page.bounce_ms,
        };
        let state_json = script_safe_json(&state)?;

        let mut context = Context::new();
        context.insert("title", &page.title);
        context.insert("entries", &page.entries);
        context.insert("no_results", &page.no_results);
        context.insert("state_json", &state_json);

        Ok(self.tera.render(PAGE_TEMPLATE, &context)?)
    }

    /// Render a page and write it to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub async fn write(&self, page: &MapPage, path: &Path) -> Result<(), TemplateError> {
        let html = self.render(page)?;
        tokio::fs::write(path, html)
            .await
            .map_err(|e| TemplateError::Write {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        info!(path = %path.display(), markers = page.map.markers.len(), "Map page written");
        Ok(())
    }
}

/// Serialize for embedding inside a `<script>` element
fn script_safe_json<T: Serialize>(value: &T) -> Result<String, TemplateError> {
    let json = serde_json::to_string(value).map_err(|e| TemplateError::Data(e.to_string()))?;
    Ok(json.replace("</", "<\\/"))
}
