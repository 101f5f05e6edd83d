//! Domain entities - Objects with identity and lifecycle

mod trail;

pub use trail::{Trail, coordinates_from_link};
