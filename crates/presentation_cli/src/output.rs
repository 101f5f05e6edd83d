//! Plain-text rendering of command results

use std::fmt::Write;

use application::services::{ResultsRegion, SearchOutcome};
use domain::entities::Trail;
use domain::value_objects::distance;

/// Result list for a finished search
pub fn render_results(outcome: &SearchOutcome, region: &ResultsRegion) -> String {
    let origin = outcome
        .origin
        .label
        .as_deref()
        .unwrap_or(&outcome.origin.resolved_query);
    let mut out = String::new();

    let _ = writeln!(out, "📍 {origin} ({})", outcome.origin.location);
    if outcome.origin.via_fallback {
        let _ = writeln!(
            out,
            "   (matched \"{}\"; results may be approximate)",
            outcome.origin.resolved_query
        );
    }

    if region.shows_no_results() {
        let _ = writeln!(out, "No trails found within {}.", outcome.radius);
        return out;
    }

    let entries = region.entries();
    let _ = writeln!(
        out,
        "🥾 {} trail(s) within {}:",
        entries.len(),
        outcome.radius
    );
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} ({:.1} mi)",
            i + 1,
            entry.trail.name,
            entry.distance_miles
        );
        if !entry.trail.address.is_empty() {
            let _ = writeln!(out, "     {}", entry.trail.address);
        }
        if let Some(link) = &entry.directions_link {
            let _ = writeln!(out, "     {link}");
        }
    }
    out
}

/// Trail dataset listing
pub fn render_trails(trails: &[Trail]) -> String {
    let mut out = String::new();
    let mut placed = 0;
    for trail in trails {
        match trail.location() {
            Some(location) => {
                placed += 1;
                let _ = writeln!(out, "{} [{location}]", trail.name);
            },
            None => {
                let _ = writeln!(out, "{} [no coordinates]", trail.name);
            },
        }
    }
    let _ = writeln!(out, "{} trails, {placed} with coordinates", trails.len());
    out
}

/// Distance line for the `distance` command
pub fn render_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> String {
    format!("{:.2} mi", distance(lat1, lon1, lat2, lon2))
}

#[cfg(test)]
mod tests {
    use application::ports::MarkerId;
    use application::services::{ResolvedOrigin, ResultEntry, ResultsView, TrailMatch};
    use domain::value_objects::{GeoLocation, Radius};

    use super::*;

    fn outcome(matches: Vec<TrailMatch>, via_fallback: bool) -> SearchOutcome {
        SearchOutcome {
            origin: ResolvedOrigin {
                location: GeoLocation::new(40.0, -75.0).unwrap(),
                label: None,
                resolved_query: "Springfield".to_string(),
                via_fallback,
            },
            radius: Radius::new(10.0).unwrap(),
            marker_count: 1 + matches.len(),
            matches,
        }
    }

    #[test]
    fn lists_entries_with_distance() {
        let trail = Trail::new("Ridge Loop", "Main St").with_coordinates(40.05, -75.05);
        let region = ResultsRegion {
            visible: true,
            view: ResultsView::Entries(vec![ResultEntry {
                directions_link: trail.directions_link(),
                trail,
                distance_miles: 4.38,
                marker: MarkerId::new(2),
            }]),
        };

        let text = render_results(&outcome(Vec::new(), false), &region);

        assert!(text.contains("1 trail(s) within 10 mi"));
        assert!(text.contains("  1. Ridge Loop (4.4 mi)"));
        assert!(text.contains("Main St"));
        assert!(text.contains("maps.google.com"));
    }

    #[test]
    fn reports_no_results() {
        let region = ResultsRegion {
            visible: true,
            view: ResultsView::NoResults,
        };
        let text = render_results(&outcome(Vec::new(), true), &region);
        assert!(text.contains("No trails found within 10 mi."));
        assert!(text.contains("results may be approximate"));
    }

    #[test]
    fn trail_listing_counts_placeable() {
        let trails = vec![
            Trail::new("A", "x").with_coordinates(40.0, -75.0),
            Trail::new("B", "y"),
        ];
        let text = render_trails(&trails);
        assert!(text.contains("B [no coordinates]"));
        assert!(text.ends_with("2 trails, 1 with coordinates\n"));
    }

    #[test]
    fn distance_is_formatted() {
        assert_eq!(render_distance(40.0, -75.0, 40.0, -75.0), "0.00 mi");
    }
}
