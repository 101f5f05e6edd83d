//! Port definitions - Interfaces for external systems
//!
//! Ports define the contracts that infrastructure adapters must implement.
//! The search services depend only on these traits.

mod device_capability_port;
mod location_lookup_port;
mod map_widget_port;
mod trail_source_port;

pub use device_capability_port::DeviceCapabilityPort;
pub use location_lookup_port::{GeocodingPort, ResolvedPlace, ZipLookupPort};
pub use map_widget_port::{MapWidgetPort, MarkerIcon, MarkerId, MarkerPopup, MarkerSpec, TileLayer};
pub use trail_source_port::TrailSourcePort;

#[cfg(test)]
pub use device_capability_port::MockDeviceCapabilityPort;
#[cfg(test)]
pub use location_lookup_port::{MockGeocodingPort, MockZipLookupPort};
#[cfg(test)]
pub use map_widget_port::MockMapWidgetPort;
#[cfg(test)]
pub use trail_source_port::MockTrailSourcePort;
