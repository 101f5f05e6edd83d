//! Application configuration
//!
//! Layered in this order, later sources winning:
//! 1. built-in defaults
//! 2. optional `trailfinder.toml` (or an explicit file)
//! 3. environment variables prefixed with `TRAILFINDER`, sections separated
//!    by `__` (e.g. `TRAILFINDER__MAP__DEFAULT_ZOOM=12`)
//!
//! Sections:
//! - `trails`: dataset source
//! - `geocoding`: Nominatim free-text geocoder
//! - `zip_lookup`: Zippopotam.us ZIP lookup
//! - `map`: zoom, tiles, focus bounce
//! - `device`: hover capability
//! - `logging`: filter and output format

mod sections;

use std::path::Path;

use integration_geocoding::{NominatimConfig, ZipLookupConfig};
use serde::{Deserialize, Serialize};

pub use sections::{DeviceConfig, MapAppConfig, TrailsConfig};

use crate::telemetry::LoggingConfig;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "trailfinder";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TRAILFINDER";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Trail dataset source
    #[serde(default)]
    pub trails: TrailsConfig,

    /// Free-text geocoder
    #[serde(default)]
    pub geocoding: NominatimConfig,

    /// ZIP code lookup
    #[serde(default)]
    pub zip_lookup: ZipLookupConfig,

    /// Map presentation
    #[serde(default)]
    pub map: MapAppConfig,

    /// Device capabilities
    #[serde(default)]
    pub device: DeviceConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `trailfinder.toml` (if present) and environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or a value has the wrong type.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default file
    ///
    /// An explicit path must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or parsed.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .set_default("trails.source", "trails.json")?
            .set_default("map.default_zoom", 10)?
            .set_default("logging.filter", "warn")?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.trails.validate()?;
        self.geocoding
            .validate()
            .map_err(|e| format!("geocoding: {e}"))?;
        self.zip_lookup
            .validate()
            .map_err(|e| format!("zip_lookup: {e}"))?;
        self.map.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
