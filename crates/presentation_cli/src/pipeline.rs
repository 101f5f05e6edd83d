//! Wires configuration into a ready-to-use search service

use std::sync::Arc;

use application::ports::MapWidgetPort;
use application::services::{LocationResolver, MapRenderer, SearchService, TrailRepository};
use infrastructure::{
    AppConfig, ConfiguredDevice, GeocodingAdapter, HeadlessMapWidget, JsonTrailSource,
    ZipLookupAdapter,
};
use tracing::debug;

/// Search service plus the widget it draws on
pub struct Pipeline {
    /// Search orchestrator
    pub service: SearchService,
    /// Map state for export
    pub widget: Arc<HeadlessMapWidget>,
}

impl Pipeline {
    /// Build every adapter and start loading trails in the background
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be created.
    pub fn build(config: &AppConfig) -> anyhow::Result<Self> {
        let source = JsonTrailSource::from_config(&config.trails)?;
        debug!(source = %config.trails.source, "Loading trails");
        let trails = TrailRepository::spawn_load(Arc::new(source));

        let zip_lookup = ZipLookupAdapter::from_config(&config.zip_lookup)?;
        let geocoder = GeocodingAdapter::from_config(&config.geocoding)?;
        let resolver = LocationResolver::new(Arc::new(zip_lookup), Arc::new(geocoder));

        let widget = Arc::new(HeadlessMapWidget::new());
        let renderer = MapRenderer::new(
            Arc::clone(&widget) as Arc<dyn MapWidgetPort>,
            Arc::new(ConfiguredDevice::from(&config.device)),
            config.map.to_renderer_config(),
        );

        Ok(Self {
            service: SearchService::new(trails, resolver, renderer),
            widget,
        })
    }
}
