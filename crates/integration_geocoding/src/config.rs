//! Lookup service configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default user agent sent to public lookup services
const DEFAULT_USER_AGENT: &str = "TrailFinder/0.3 (https://github.com/trailfinder/trailfinder)";

/// Configuration for the ZIP code lookup service (Zippopotam.us)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZipLookupConfig {
    /// Base URL for the Zippopotam.us API
    #[serde(default = "default_zip_base_url")]
    pub base_url: String,

    /// Country code used in the lookup path
    #[serde(default = "default_zip_country")]
    pub country: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_zip_base_url() -> String {
    "https://api.zippopotam.us".to_string()
}

fn default_zip_country() -> String {
    "us".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for ZipLookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_zip_base_url(),
            country: default_zip_country(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ZipLookupConfig {
    /// Create a configuration pointing at a test server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_base_url(&self.base_url)?;

        if self.country.trim().is_empty() {
            return Err("country must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Country code filter (e.g., "us"); empty searches worldwide
    #[serde(default = "default_country_filter")]
    pub country_filter: String,

    /// Minimum spacing between requests in milliseconds
    ///
    /// Nominatim's usage policy allows at most one request per second.
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,

    /// User agent identifying this application
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Longest accepted geocoding cache lifetime (one year)
pub const MAX_CACHE_TTL_HOURS: u64 = 24 * 365;

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_country_filter() -> String {
    "us".to_string()
}

const fn default_min_request_interval_ms() -> u64 {
    1100
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            country_filter: default_country_filter(),
            min_request_interval_ms: default_min_request_interval_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration pointing at a test server
    ///
    /// Caching and rate limiting are disabled.
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 5,
            cache_ttl_hours: 0,
            min_request_interval_ms: 0,
            ..Default::default()
        }
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_hours > 0
    }

    /// Cache lifetime, capped at [`MAX_CACHE_TTL_HOURS`]
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours.min(MAX_CACHE_TTL_HOURS) * 3600)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_base_url(&self.base_url)?;

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.cache_ttl_hours > MAX_CACHE_TTL_HOURS {
            return Err(format!(
                "cache_ttl_hours must be at most {MAX_CACHE_TTL_HOURS}, got {}",
                self.cache_ttl_hours
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}

fn validate_base_url(base_url: &str) -> Result<(), String> {
    if base_url.is_empty() {
        return Err("base_url must not be empty".to_string());
    }

    let parsed = url::Url::parse(base_url).map_err(|e| format!("invalid base_url: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("base_url must be http(s), got {}", parsed.scheme()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_config_default() {
        let config = ZipLookupConfig::default();
        assert_eq!(config.base_url, "https://api.zippopotam.us");
        assert_eq!(config.country, "us");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nominatim_config_default() {
        let config = NominatimConfig::default();
        assert_eq!(config.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.cache_ttl_hours, 24);
        assert_eq!(config.country_filter, "us");
        assert_eq!(config.min_request_interval_ms, 1100);
        assert!(config.caching_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nominatim_config_for_testing() {
        let config = NominatimConfig::for_testing("http://127.0.0.1:9000");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert!(!config.caching_enabled());
        assert_eq!(config.min_request_interval_ms, 0);
    }

    #[test]
    fn test_validation_rejects_bad_urls() {
        let config = ZipLookupConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = NominatimConfig {
            base_url: "ftp://nominatim.example".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = NominatimConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = ZipLookupConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = NominatimConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cache_ttl_is_bounded() {
        let config = NominatimConfig {
            cache_ttl_hours: u64::MAX,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(
            config.cache_ttl(),
            Duration::from_secs(MAX_CACHE_TTL_HOURS * 3600)
        );

        let config = NominatimConfig {
            cache_ttl_hours: MAX_CACHE_TTL_HOURS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(NominatimConfig::default().cache_ttl(), Duration::from_secs(24 * 3600));
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: NominatimConfig =
            serde_json::from_str(r#"{"country_filter": ""}"#).unwrap();
        assert!(config.country_filter.is_empty());
        assert_eq!(config.base_url, "https://nominatim.openstreetmap.org");

        let config: ZipLookupConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.country, "us");
    }
}
