//! Trail dataset adapter - implements TrailSourcePort for JSON files and URLs

use std::path::PathBuf;
use std::time::Duration;

use application::error::ApplicationError;
use application::ports::TrailSourcePort;
use async_trait::async_trait;
use domain::entities::Trail;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::TrailsConfig;

/// Errors raised while loading the trail dataset
#[derive(Debug, Error)]
pub enum TrailSourceError {
    /// Local file could not be read
    #[error("Failed to read {path}: {message}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        message: String,
    },

    /// Remote request failed
    #[error("Failed to fetch trail data: {0}")]
    Http(String),

    /// Remote server answered with an error status
    #[error("Trail data request returned status {0}")]
    Status(u16),

    /// Payload is not a JSON array of trail records
    #[error("Invalid trail data: {0}")]
    Parse(String),
}

impl From<TrailSourceError> for ApplicationError {
    fn from(e: TrailSourceError) -> Self {
        Self::ExternalService(e.to_string())
    }
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Url {
        url: String,
        client: reqwest::Client,
    },
}

/// Loads trail records from a JSON array
#[derive(Debug, Clone)]
pub struct JsonTrailSource {
    location: Location,
}

impl JsonTrailSource {
    /// Read trails from a local file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(path.into()),
        }
    }

    /// Fetch trails from an `http(s)` URL
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn url(url: impl Into<String>, timeout: Duration) -> Result<Self, TrailSourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TrailSourceError::Http(e.to_string()))?;
        Ok(Self {
            location: Location::Url {
                url: url.into(),
                client,
            },
        })
    }

    /// Pick a file or URL source from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(config: &TrailsConfig) -> Result<Self, TrailSourceError> {
        if config.is_remote() {
            Self::url(&config.source, Duration::from_secs(config.timeout_secs))
        } else {
            Ok(Self::file(&config.source))
        }
    }

    /// Parse a JSON array of trail records
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a JSON array of trails.
    pub fn parse(bytes: &[u8]) -> Result<Vec<Trail>, TrailSourceError> {
        serde_json::from_slice(bytes).map_err(|e| TrailSourceError::Parse(e.to_string()))
    }

    async fn read(&self) -> Result<Vec<u8>, TrailSourceError> {
        match &self.location {
            Location::File(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|e| TrailSourceError::Io {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })
            },
            Location::Url { url, client } => {
                let response = client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| TrailSourceError::Http(e.to_string()))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(TrailSourceError::Status(status.as_u16()));
                }

                let body = response
                    .bytes()
                    .await
                    .map_err(|e| TrailSourceError::Http(e.to_string()))?;
                Ok(body.to_vec())
            },
        }
    }
}

#[async_trait]
impl TrailSourcePort for JsonTrailSource {
    #[instrument(skip(self), fields(source = %self.describe()))]
    async fn fetch_trails(&self) -> Result<Vec<Trail>, ApplicationError> {
        let bytes = self.read().await?;
        debug!(bytes = bytes.len(), "Trail data received");
        Self::parse(&bytes).map_err(Into::into)
    }

    fn describe(&self) -> String {
        match &self.location {
            Location::File(path) => path.display().to_string(),
            Location::Url { url, .. } => url.clone(),
        }
    }
}
