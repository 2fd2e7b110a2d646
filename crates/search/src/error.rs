//! Error types for the search crate.

use profinder_core::ErrorCode;
use profinder_geo::GeoError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Boxed error returned by store, geocoder and location adapters.
pub type PortError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors surfaced to the caller of a search, lookup or location request.
///
/// None of these are fatal: each one is local to a single attempt and the
/// user action can simply be repeated.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Address lookup failed or found nothing
    #[error("Geocoding failed: {0}")]
    GeocodingFailed(#[from] GeocodingFailure),

    /// The current position could not be determined
    #[error("Location unavailable: {0}")]
    LocationUnavailable(#[from] LocationError),

    /// One of the store round-trips failed
    #[error("Search failed during {phase}: {source}")]
    SearchFailed {
        /// Which round-trip failed
        phase: SearchPhase,
        /// Underlying cause
        #[source]
        source: PortError,
    },

    /// The query itself was malformed
    #[error("Invalid search query: {0}")]
    InvalidQuery(#[from] GeoError),
}

impl SearchError {
    /// Wrap a store failure for the given phase.
    pub fn search_failed(phase: SearchPhase, source: impl Into<PortError>) -> Self {
        Self::SearchFailed {
            phase,
            source: source.into(),
        }
    }

    /// Returns the shared error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::GeocodingFailed(GeocodingFailure::EmptyAddress) => ErrorCode::AddressEmpty,
            Self::GeocodingFailed(GeocodingFailure::NotFound(_)) => ErrorCode::AddressNotFound,
            Self::GeocodingFailed(_) => ErrorCode::GeocodingFailed,
            Self::LocationUnavailable(LocationError::Timeout(_)) => ErrorCode::LocationTimeout,
            Self::LocationUnavailable(LocationError::PermissionDenied) => ErrorCode::LocationDenied,
            Self::LocationUnavailable(_) => ErrorCode::LocationUnavailable,
            Self::SearchFailed { .. } => ErrorCode::SearchFailed,
            Self::InvalidQuery(GeoError::InvalidRadius(_)) => ErrorCode::InvalidRadius,
            Self::InvalidQuery(GeoError::InvalidCoordinate(_)) => ErrorCode::InvalidCoordinate,
        }
    }

    /// Short message suitable for showing to an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::GeocodingFailed(GeocodingFailure::EmptyAddress) => "Please enter an address",
            Self::GeocodingFailed(GeocodingFailure::NotFound(_)) => {
                "Could not find the location. Please try a different address."
            }
            Self::GeocodingFailed(_) => "An error occurred while searching for the location.",
            Self::LocationUnavailable(_) => "Could not get your current location.",
            Self::SearchFailed { .. } => "Searching for professionals failed. Please try again.",
            Self::InvalidQuery(_) => "The search location or radius is not valid.",
        }
    }
}

/// The store round-trip a [`SearchError::SearchFailed`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Spatial index lookup returning candidate identifiers
    RadiusLookup,
    /// Full-record fetch for the candidate identifiers
    Hydration,
    /// Category listing
    Categories,
    /// Browsing professionals of one category
    CategoryBrowse,
    /// Listing the newest professionals
    Recent,
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RadiusLookup => "radius lookup",
            Self::Hydration => "hydration",
            Self::Categories => "category listing",
            Self::CategoryBrowse => "category browse",
            Self::Recent => "recent listing",
        })
    }
}

/// Why an address could not be turned into a coordinate.
#[derive(Debug, Error)]
pub enum GeocodingFailure {
    /// Blank input
    #[error("address cannot be empty")]
    EmptyAddress,

    /// The service had no match
    #[error("no match for \"{0}\"")]
    NotFound(String),

    /// The service answered with an unusable coordinate
    #[error("service returned an invalid coordinate: {0}")]
    InvalidCoordinate(GeoError),

    /// The request itself failed
    #[error("request failed: {0}")]
    Transport(#[source] PortError),
}

/// Why the platform could not provide a position.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The user or platform refused access
    #[error("permission denied")]
    PermissionDenied,

    /// No positioning capability on this host
    #[error("no location sensor available")]
    NoSensor,

    /// No fix within the allotted time
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The fix was outside valid coordinate ranges
    #[error("invalid position: {0}")]
    InvalidFix(GeoError),

    /// Any other provider failure
    #[error("{0}")]
    Provider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = SearchError::from(GeocodingFailure::EmptyAddress);
        assert_eq!(err.code(), ErrorCode::AddressEmpty);

        let err = SearchError::from(LocationError::Timeout(Duration::from_secs(10)));
        assert_eq!(err.code(), ErrorCode::LocationTimeout);
        assert!(err.to_string().contains("timed out"));

        let err = SearchError::search_failed(SearchPhase::Hydration, "503 from store");
        assert_eq!(err.code(), ErrorCode::SearchFailed);
        assert_eq!(err.to_string(), "Search failed during hydration: 503 from store");
    }

    #[test]
    fn test_search_failed_keeps_source() {
        use std::error::Error as _;

        let err = SearchError::search_failed(SearchPhase::RadiusLookup, "connection reset");
        assert_eq!(err.source().unwrap().to_string(), "connection reset");
    }
}
