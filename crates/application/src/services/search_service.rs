//! Search orchestrator
//!
//! Wires one search from user input to rendered output:
//!
//! `Idle → Validating → Resolving → Filtering → Rendering → Done`
//!
//! A rejected input returns to `Idle`; a resolver failure ends in `Error`.
//! Searches are latest-wins: every call takes a generation number, and a
//! search that is no longer the newest when it reaches `Rendering` is
//! dropped with [`SearchError::Superseded`]. Rendering holds the renderer
//! lock, so marker placement from two searches never interleaves.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use domain::entities::Trail;
use domain::value_objects::{LocationQuery, Radius};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use super::{
    location_resolver::{LocationResolver, ResolvedOrigin},
    map_renderer::MapRenderer,
    trail_filter::{TrailMatch, trails_within},
    trail_repository::TrailRepository,
};
use crate::{error::SearchError, ports::MarkerId};

/// Raw user input for one search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// ZIP code or free-text location
    pub location: String,
    /// Radius in miles
    pub radius_miles: f64,
}

impl SearchRequest {
    /// Create a search request
    pub fn new(location: impl Into<String>, radius_miles: f64) -> Self {
        Self {
            location: location.into(),
            radius_miles,
        }
    }
}

/// Stage of the most recent search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// Waiting for input
    Idle,
    /// Checking input and data readiness
    Validating,
    /// Looking up the origin
    Resolving,
    /// Computing distances
    Filtering,
    /// Updating map and result list
    Rendering,
    /// Results shown
    Done,
    /// Resolution failed; message shown
    Error,
}

/// One row of the result list, bound to its map marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// The trail
    pub trail: Trail,
    /// Distance from the origin in miles
    pub distance_miles: f64,
    /// Outbound directions link
    pub directions_link: Option<String>,
    /// Marker that selecting this entry focuses
    pub marker: MarkerId,
}

/// Contents of the results region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum ResultsView {
    /// Nothing searched yet
    Empty,
    /// Explicit "no trails found" indicator
    NoResults,
    /// Matching trails
    Entries(Vec<ResultEntry>),
}

/// Results/map region state owned by the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsRegion {
    /// Whether the results and map region is shown
    pub visible: bool,
    /// What the result list displays
    pub view: ResultsView,
}

impl Default for ResultsRegion {
    fn default() -> Self {
        Self {
            visible: false,
            view: ResultsView::Empty,
        }
    }
}

impl ResultsRegion {
    /// Result entries; empty for `Empty` and `NoResults`
    #[must_use]
    pub fn entries(&self) -> &[ResultEntry] {
        match &self.view {
            ResultsView::Entries(entries) => entries,
            ResultsView::Empty | ResultsView::NoResults => &[],
        }
    }

    /// Whether the "no results" indicator is shown
    #[must_use]
    pub const fn shows_no_results(&self) -> bool {
        matches!(self.view, ResultsView::NoResults)
    }
}

/// Result of a completed search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Resolved search origin
    pub origin: ResolvedOrigin,
    /// Radius used
    pub radius: Radius,
    /// Trails within the radius, in dataset order
    pub matches: Vec<TrailMatch>,
    /// Markers on the map after rendering
    pub marker_count: usize,
}

/// Search orchestrator; sole mutator of the map renderer
pub struct SearchService {
    trails: Arc<TrailRepository>,
    resolver: LocationResolver,
    renderer: Mutex<MapRenderer>,
    results: RwLock<ResultsRegion>,
    phase: watch::Sender<SearchPhase>,
    generation: AtomicU64,
}

impl fmt::Debug for SearchService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchService")
            .field("phase", &self.phase())
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl SearchService {
    /// Create the orchestrator
    pub fn new(
        trails: Arc<TrailRepository>,
        resolver: LocationResolver,
        renderer: MapRenderer,
    ) -> Self {
        let (phase, _) = watch::channel(SearchPhase::Idle);
        Self {
            trails,
            resolver,
            renderer: Mutex::new(renderer),
            results: RwLock::new(ResultsRegion::default()),
            phase,
            generation: AtomicU64::new(0),
        }
    }

    /// Trail repository backing the search
    #[must_use]
    pub fn trails(&self) -> &Arc<TrailRepository> {
        &self.trails
    }

    /// Stage of the most recent search
    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        *self.phase.borrow()
    }

    /// Subscribe to phase changes
    #[must_use]
    pub fn subscribe_phase(&self) -> watch::Receiver<SearchPhase> {
        self.phase.subscribe()
    }

    /// Snapshot of the results region
    #[must_use]
    pub fn results(&self) -> ResultsRegion {
        self.results.read().clone()
    }

    /// Markers currently on the map
    pub async fn marker_count(&self) -> usize {
        self.renderer.lock().await.marker_count()
    }

    /// Run one search from raw input to rendered results
    #[instrument(skip(self, request), fields(location = %request.location, radius = request.radius_miles))]
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.set_phase(generation, SearchPhase::Validating);
        let (query, radius) = match self.validate(request) {
            Ok(valid) => valid,
            Err(e) => {
                warn!(error = %e, "Search rejected");
                self.set_phase(generation, SearchPhase::Idle);
                return Err(e);
            },
        };

        self.set_phase(generation, SearchPhase::Resolving);
        let origin = match self.resolver.resolve(&query).await {
            Ok(origin) => origin,
            Err(e) => {
                if !self.is_current(generation) {
                    debug!(generation, error = %e, "Dropping superseded search");
                    return Err(SearchError::Superseded);
                }
                warn!(error = %e, "Location resolution failed");
                self.set_phase(generation, SearchPhase::Error);
                return Err(e);
            },
        };

        self.set_phase(generation, SearchPhase::Filtering);
        let trails = self.trails.all();
        let matches = trails_within(&origin.location, radius, &trails);
        debug!(
            total = trails.len(),
            matched = matches.len(),
            "Filtered trails"
        );

        let mut renderer = self.renderer.lock().await;
        if !self.is_current(generation) {
            debug!(generation, "Dropping superseded search");
            return Err(SearchError::Superseded);
        }

        self.set_phase(generation, SearchPhase::Rendering);
        renderer.center_on(origin.location);
        renderer.clear_trail_markers();
        renderer.place_user_marker(origin.location);

        let entries: Vec<ResultEntry> = matches
            .iter()
            .map(|m| ResultEntry {
                marker: renderer.place_trail_marker(&m.trail, m.location),
                trail: m.trail.clone(),
                distance_miles: m.distance_miles,
                directions_link: m.trail.directions_link(),
            })
            .collect();

        {
            let mut region = self.results.write();
            region.view = if entries.is_empty() {
                ResultsView::NoResults
            } else {
                ResultsView::Entries(entries)
            };
            region.visible = true;
        }
        renderer.invalidate_size();
        let marker_count = renderer.marker_count();
        drop(renderer);

        self.set_phase(generation, SearchPhase::Done);
        info!(
            origin = %origin.location,
            matches = matches.len(),
            "Search complete"
        );

        Ok(SearchOutcome {
            origin,
            radius,
            matches,
            marker_count,
        })
    }

    /// Focus the map marker of the result entry at `index`
    #[instrument(skip(self))]
    pub async fn select_result(&self, index: usize) -> Result<MarkerId, SearchError> {
        let marker = self
            .results
            .read()
            .entries()
            .get(index)
            .map(|entry| entry.marker)
            .ok_or(SearchError::UnknownResult(index))?;

        let renderer = self.renderer.lock().await;
        renderer
            .focus_marker(marker)
            .await
            .map_err(|_| SearchError::UnknownResult(index))
    }

    fn validate(&self, request: &SearchRequest) -> Result<(LocationQuery, Radius), SearchError> {
        let query = LocationQuery::parse(&request.location).ok_or(SearchError::EmptyInput)?;

        if !self.trails.is_loaded() || self.trails.is_empty() {
            return Err(SearchError::TrailsNotLoaded);
        }

        let radius = Radius::new(request.radius_miles)?;
        Ok((query, radius))
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn set_phase(&self, generation: u64, phase: SearchPhase) {
        if self.is_current(generation) {
            self.phase.send_replace(phase);
        }
    }
}
