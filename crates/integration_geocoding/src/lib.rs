//! Location lookup for the trail finder
//!
//! Resolves user input to coordinates through two public services:
//! [Zippopotam.us](https://api.zippopotam.us) for US ZIP codes and
//! [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org) for free-text
//! addresses and place names.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern. [`ZipLookupClient`] is
//! implemented by [`ZippopotamClient`], [`GeocodingClient`] by
//! [`NominatimGeocodingClient`]. Both clients report "nothing found" as a
//! dedicated error variant so callers can tell it apart from transport failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geocoding::{ZipLookupClient, ZipLookupConfig, ZippopotamClient};
//!
//! let client = ZippopotamClient::new(&ZipLookupConfig::default())?;
//! let place = client.lookup("19103").await?;
//! println!("{} -> {}", place.place_name, place.location);
//! ```

mod config;
mod error;
mod geocoding;
mod models;
mod zip_lookup;

pub use config::{MAX_CACHE_TTL_HOURS, NominatimConfig, ZipLookupConfig};
pub use error::{GeocodingError, ZipLookupError};
pub use geocoding::{GeocodingClient, NominatimGeocodingClient};
pub use models::{GeocodedPlace, ZipPlace};
pub use zip_lookup::{ZipLookupClient, ZippopotamClient};
