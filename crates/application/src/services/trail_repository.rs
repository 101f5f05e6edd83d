//! Trail repository
//!
//! Holds the trail dataset in memory. The dataset is fetched once, in the
//! background, and never changes afterwards. Readiness is observable through
//! [`TrailRepository::state`] and [`TrailRepository::wait_until_settled`].

use std::sync::{Arc, OnceLock};

use domain::entities::Trail;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};

use crate::ports::TrailSourcePort;

/// Loading progress of the trail dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum TrailLoadState {
    /// Fetch has not finished yet
    Loading,
    /// Dataset is available with this many trails
    Loaded(usize),
    /// Fetch or parse failed; the repository stays empty
    Failed(String),
}

impl TrailLoadState {
    /// Whether loading has finished, successfully or not
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// In-memory, load-once trail collection
#[derive(Debug)]
pub struct TrailRepository {
    trails: OnceLock<Arc<[Trail]>>,
    state: watch::Sender<TrailLoadState>,
}

impl Default for TrailRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailRepository {
    /// Create an empty repository in the `Loading` state
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(TrailLoadState::Loading);
        Self {
            trails: OnceLock::new(),
            state,
        }
    }

    /// Create a repository that is already loaded
    #[must_use]
    pub fn with_trails(trails: Vec<Trail>) -> Self {
        let repo = Self::new();
        repo.finish(Ok(trails));
        repo
    }

    /// Start loading in the background and return immediately
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_load(source: Arc<dyn TrailSourcePort>) -> Arc<Self> {
        let repo = Arc::new(Self::new());
        let loader = Arc::clone(&repo);
        tokio::spawn(async move {
            loader.load_from(source.as_ref()).await;
        });
        repo
    }

    /// Fetch the dataset from a source and publish it
    ///
    /// Failures are logged and leave the repository empty. A repository that
    /// has already settled ignores further loads.
    #[instrument(skip(self, source), fields(source = %source.describe()))]
    pub async fn load_from(&self, source: &dyn TrailSourcePort) {
        if self.state().is_settled() {
            warn!("Trail data already settled, ignoring reload");
            return;
        }

        let result = source.fetch_trails().await.map_err(|e| e.to_string());
        self.finish(result);
    }

    fn finish(&self, result: Result<Vec<Trail>, String>) {
        let next = match result {
            Ok(trails) => {
                let count = trails.len();
                if self.trails.set(trails.into()).is_err() {
                    warn!("Trail data already set, keeping the first dataset");
                    return;
                }
                info!(count, "Loaded {count} trails.");
                TrailLoadState::Loaded(count)
            },
            Err(reason) => {
                error!(%reason, "Failed to load trail data");
                TrailLoadState::Failed(reason)
            },
        };
        self.state.send_replace(next);
    }

    /// Whether the dataset has been loaded successfully
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(*self.state.borrow(), TrailLoadState::Loaded(_))
    }

    /// Every trail; empty until loaded
    #[must_use]
    pub fn all(&self) -> Arc<[Trail]> {
        self.trails
            .get()
            .map_or_else(|| Arc::from(Vec::new()), Arc::clone)
    }

    /// Number of trails currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.trails.get().map_or(0, |t| t.len())
    }

    /// Whether the repository holds no trails
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current loading state
    #[must_use]
    pub fn state(&self) -> TrailLoadState {
        self.state.borrow().clone()
    }

    /// Subscribe to loading state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TrailLoadState> {
        self.state.subscribe()
    }

    /// Wait until loading has finished, successfully or not
    pub async fn wait_until_settled(&self) -> TrailLoadState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(TrailLoadState::is_settled).await {
            Ok(state) => (*state).clone(),
            Err(_) => self.state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::MockTrailSourcePort;

    fn sample_trails() -> Vec<Trail> {
        vec![
            Trail::new("Forbidden Drive", "Philadelphia, PA").with_coordinates(40.05, -75.22),
            Trail::new("Valley Creek", "Valley Forge, PA")
                .with_map_link("https://www.google.com/maps/@40.09,-75.45,15z"),
        ]
    }

    fn source_returning(trails: Vec<Trail>) -> MockTrailSourcePort {
        let mut source = MockTrailSourcePort::new();
        source.expect_describe().return_const("test".to_string());
        source
            .expect_fetch_trails()
            .times(1)
            .returning(move || Ok(trails.clone()));
        source
    }

    #[test]
    fn new_repository_is_loading_and_empty() {
        let repo = TrailRepository::new();
        assert_eq!(repo.state(), TrailLoadState::Loading);
        assert!(!repo.is_loaded());
        assert!(repo.all().is_empty());
        assert!(repo.is_empty());
    }

    #[test]
    fn with_trails_is_loaded() {
        let repo = TrailRepository::with_trails(sample_trails());
        assert!(repo.is_loaded());
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.state(), TrailLoadState::Loaded(2));
    }

    #[tokio::test]
    async fn load_from_publishes_trails() {
        let repo = TrailRepository::new();
        repo.load_from(&source_returning(sample_trails())).await;

        assert!(repo.is_loaded());
        assert_eq!(repo.all()[0].name, "Forbidden Drive");
    }

    #[tokio::test]
    async fn load_failure_leaves_repository_empty() {
        let mut source = MockTrailSourcePort::new();
        source.expect_describe().return_const("broken".to_string());
        source
            .expect_fetch_trails()
            .returning(|| Err(ApplicationError::ExternalService("HTTP 404".to_string())));

        let repo = TrailRepository::new();
        repo.load_from(&source).await;

        assert!(!repo.is_loaded());
        assert!(repo.all().is_empty());
        assert!(matches!(repo.state(), TrailLoadState::Failed(reason) if reason.contains("404")));
    }

    #[tokio::test]
    async fn settled_repository_ignores_reload() {
        let repo = TrailRepository::with_trails(sample_trails());
        let mut source = MockTrailSourcePort::new();
        source.expect_describe().return_const("second".to_string());
        source.expect_fetch_trails().times(0);

        repo.load_from(&source).await;
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn spawn_load_settles_in_background() {
        let repo = TrailRepository::spawn_load(Arc::new(source_returning(sample_trails())));
        let state = repo.wait_until_settled().await;

        assert_eq!(state, TrailLoadState::Loaded(2));
        assert!(repo.is_loaded());
    }

    #[tokio::test]
    async fn subscribers_observe_transition() {
        let repo = Arc::new(TrailRepository::new());
        let mut rx = repo.subscribe();
        assert_eq!(*rx.borrow_and_update(), TrailLoadState::Loading);

        repo.load_from(&source_returning(sample_trails())).await;

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), TrailLoadState::Loaded(2));
    }
}
