//! Radius filter over the trail dataset

use domain::entities::Trail;
use domain::value_objects::{GeoLocation, Radius};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A trail within the search radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailMatch {
    /// The matching trail
    pub trail: Trail,
    /// Where the trail was placed
    pub location: GeoLocation,
    /// Great-circle distance from the origin in miles
    pub distance_miles: f64,
}

/// Keep every trail whose distance from `origin` is at most `radius`
///
/// Trails without recoverable coordinates are skipped. Dataset order is kept.
pub fn trails_within(origin: &GeoLocation, radius: Radius, trails: &[Trail]) -> Vec<TrailMatch> {
    trails
        .iter()
        .filter_map(|trail| {
            let Some(location) = trail.location() else {
                debug!(trail = %trail.name, "Skipping trail without coordinates");
                return None;
            };
            let distance_miles = origin.distance_miles(&location);
            radius.contains(distance_miles).then(|| TrailMatch {
                trail: trail.clone(),
                location,
                distance_miles,
            })
        })
        .collect()
}
