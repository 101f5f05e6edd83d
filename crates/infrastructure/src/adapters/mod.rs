//! Adapters implementing application ports

mod device_adapter;
mod headless_map_widget;
mod location_lookup_adapter;
mod trail_source_adapter;

pub use device_adapter::ConfiguredDevice;
pub use headless_map_widget::{HeadlessMapWidget, MapSnapshot, PlacedMarker};
pub use location_lookup_adapter::{GeocodingAdapter, ZipLookupAdapter};
pub use trail_source_adapter::{JsonTrailSource, TrailSourceError};
