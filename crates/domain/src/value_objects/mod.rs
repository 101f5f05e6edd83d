//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod location_query;
mod radius;

pub use geo_location::{EARTH_RADIUS_MILES, GeoLocation, InvalidCoordinates, distance};
pub use location_query::LocationQuery;
pub use radius::Radius;
