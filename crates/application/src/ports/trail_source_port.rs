//! Trail dataset source port

use async_trait::async_trait;
use domain::entities::Trail;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for fetching the static trail dataset
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TrailSourcePort: Send + Sync {
    /// Fetch and parse every trail record
    async fn fetch_trails(&self) -> Result<Vec<Trail>, ApplicationError>;

    /// Human-readable description of where trails come from (for logs)
    fn describe(&self) -> String;
}
