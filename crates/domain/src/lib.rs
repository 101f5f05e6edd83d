//! Domain layer for the trail finder
//!
//! Contains the value objects and entities the search pipeline works on:
//! coordinates and great-circle distance, the search radius, the parsed
//! location query and the trail record with its coordinate extraction.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
