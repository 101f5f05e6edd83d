//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: trail dataset
//! sources, ZIP and free-text lookups, device capabilities and a headless
//! map widget. Also hosts configuration loading, logging setup and the
//! Leaflet page export.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod templates;

pub use adapters::*;
pub use config::{AppConfig, DeviceConfig, MapAppConfig, TrailsConfig};
pub use telemetry::{LogFormat, LoggingConfig, LoggingError, init_logging};
pub use templates::{MapPage, MapPageRenderer, PageEntry, TemplateError};
