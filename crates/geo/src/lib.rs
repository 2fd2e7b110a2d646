//! Geospatial kernel for proximity search.
//!
//! This crate provides:
//! - Haversine great-circle distance on a spherical Earth
//! - Distance formatting for display (`"500 m"`, `"12.3 km"`)
//! - An explicit [`Location`] sum type for records that may have no position
//! - Batch annotation and ordering of located items
//!
//! # Example
//!
//! ```
//! use profinder_geo::{distance_km, format_distance, Coordinate};
//!
//! let berlin = Coordinate::new(52.5200, 13.4050);
//! let paris = Coordinate::new(48.8566, 2.3522);
//!
//! let km = distance_km(&berlin, &paris);
//! assert!((km - 878.0).abs() < 10.0);
//! assert!(format_distance(km).ends_with(" km"));
//! ```

mod error;
mod format;
mod haversine;
pub mod batch;

pub use batch::{annotate, retain_within_radius, sort_by_distance, Located};
pub use error::{GeoError, GeoErrorCode, Result};
pub use format::{format_distance, Distance, UNKNOWN_DISTANCE_LABEL};
pub use haversine::{distance_km, distance_m, EARTH_RADIUS_KM, EARTH_RADIUS_M};

use serde::{Deserialize, Serialize};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate without range checks.
    ///
    /// Use [`Coordinate::try_new`] for values that come from user input or the network.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// ```
    /// use profinder_geo::Coordinate;
    ///
    /// assert!(Coordinate::try_new(52.52, 13.405).is_ok());
    /// assert!(Coordinate::try_new(91.0, 0.0).is_err());
    /// ```
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeoError::InvalidCoordinate(format!(
                "latitude {latitude} / longitude {longitude} out of range"
            )))
        }
    }

    /// Returns true if both components are finite and within range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Where a record is, if anywhere.
///
/// Consumers must handle [`Location::NoLocation`] explicitly; there is no
/// nullable pair to forget about.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "coordinate", rename_all = "snake_case")]
pub enum Location {
    /// No position recorded
    #[default]
    NoLocation,
    /// Positioned at a coordinate
    At(Coordinate),
}

impl Location {
    /// Builds a location from two optional columns.
    ///
    /// Both parts must be present; a lone latitude or longitude is treated as
    /// no location. Zero is a legitimate value.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        match (latitude, longitude) {
            (Some(lat), Some(lng)) => Self::At(Coordinate::new(lat, lng)),
            _ => Self::NoLocation,
        }
    }

    /// The coordinate, if one is recorded.
    #[inline]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Self::At(coord) => Some(*coord),
            Self::NoLocation => None,
        }
    }

    /// Distance in kilometers from `origin`, or `None` without a location.
    #[inline]
    pub fn distance_to(&self, origin: &Coordinate) -> Option<f64> {
        self.coordinate().map(|coord| distance_km(origin, &coord))
    }
}

impl From<Coordinate> for Location {
    fn from(coord: Coordinate) -> Self {
        Self::At(coord)
    }
}

impl From<Option<Coordinate>> for Location {
    fn from(coord: Option<Coordinate>) -> Self {
        coord.map_or(Self::NoLocation, Self::At)
    }
}
