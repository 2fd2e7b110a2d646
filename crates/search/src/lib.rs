//! Radius search over a geospatial professional directory.
//!
//! This crate provides:
//! - Two-phase radius search: spatial lookup, then record hydration
//! - Category filtering and distance annotation, nearest first
//! - A [`SearchSession`] that discards responses from superseded searches
//! - Address resolution and current-position lookup with a timeout
//!
//! External systems sit behind the [`ProfessionalStore`], [`Geocoder`] and
//! [`LocationProvider`] traits.
//!
//! # Example
//!
//! ```no_run
//! use profinder_search::{RadiusSearch, ProfessionalStore};
//! use profinder_geo::Coordinate;
//!
//! async fn nearby<S: ProfessionalStore>(store: S) -> profinder_search::Result<()> {
//!     let search = RadiusSearch::new(store);
//!     let center = Coordinate::new(52.52, 13.405);
//!
//!     for hit in search.search_professionals_by_radius(Some(center), 10.0, None).await? {
//!         println!("{} ({})", hit.professional.display_name(), hit.distance_label());
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod geocode;
mod location;
mod model;
mod ports;
mod radius;
mod session;

#[cfg(test)]
mod test_support;

pub use error::{GeocodingFailure, LocationError, PortError, Result, SearchError, SearchPhase};
pub use geocode::resolve_address;
pub use location::{
    current_location, locate_current, FixedLocationProvider, UnavailableLocationProvider, DEFAULT_LOCATION_TIMEOUT,
};
pub use model::{
    Category, CategoryId, Place, ProfessionalId, ProfessionalRecord, ProfessionalWithDistance, Profile,
    RadiusCandidate, SearchOptions, SearchQuery, DEFAULT_BIO, DEFAULT_HEADLINE, UNNAMED_PROFESSIONAL,
};
pub use ports::{Geocoder, LocationProvider, ProfessionalStore};
pub use radius::RadiusSearch;
pub use session::{Results, SearchOutcome, SearchSession};
