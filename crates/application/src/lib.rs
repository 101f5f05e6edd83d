//! Application layer - Use cases and orchestration
//!
//! Contains the search pipeline services and the port definitions they
//! depend on. Infrastructure adapters implement the ports; the presentation
//! layer drives [`SearchService`].

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, SearchError};
pub use ports::*;
pub use services::*;
