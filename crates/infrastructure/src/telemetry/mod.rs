//! Logging infrastructure
//!
//! Console logging through `tracing-subscriber`, human-readable or JSON.

mod logging;

pub use logging::{LogFormat, LoggingConfig, LoggingError, init_logging};
