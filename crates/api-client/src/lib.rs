//! HTTP adapters for the professional directory
//!
//! This crate provides a resilient HTTP client for the Supabase project that
//! stores professionals and for the Nominatim geocoding service, plus
//! implementations of the `profinder-search` ports on top of it.
//!
//! # Features
//!
//! - **Environment-based configuration**: Load URLs and keys from environment variables
//! - **Circuit breaker**: Prevent cascading failures during outages
//! - **Optional retry with exponential backoff**: Off by default
//! - **Request correlation**: Track requests with unique IDs for debugging
//!
//! # Example
//!
//! ```rust,no_run
//! use profinder_api_client::{ProfinderClient, SupabaseStore};
//! use profinder_search::RadiusSearch;
//! use profinder_geo::Coordinate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ProfinderClient::new()?;
//!     let search = RadiusSearch::new(SupabaseStore::new(client));
//!
//!     let center = Coordinate::new(52.52, 13.405);
//!     let hits = search.search_professionals_by_radius(Some(center), 10.0, None).await?;
//!     println!("{} professionals nearby", hits.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

pub use adapters::{NominatimGeocoder, SupabaseStore};
pub use client::{ProfinderClient, Service};
pub use config::{ClientConfig, Environment, DEFAULT_GEOCODER_URL};
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::adapters::{NominatimGeocoder, SupabaseStore};
    pub use crate::client::ProfinderClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{CategoriesApi, GeocodingApi, ProfessionalsApi};
    pub use crate::error::{ApiError, ApiResult};
}
