//! Application services - Use case implementations

mod location_resolver;
mod map_renderer;
mod search_service;
mod trail_filter;
mod trail_repository;

pub use location_resolver::{LocationResolver, ResolvedOrigin};
pub use map_renderer::{MapRenderer, MapRendererConfig};
pub use search_service::{
    ResultEntry, ResultsRegion, ResultsView, SearchOutcome, SearchPhase, SearchRequest,
    SearchService,
};
pub use trail_filter::{TrailMatch, trails_within};
pub use trail_repository::{TrailLoadState, TrailRepository};
