//! Geocoding API endpoints
//!
//! Maps to a Nominatim instance:
//! - `GET search?format=json&q=<address>`: forward lookup
//! - `GET reverse?format=json&lat=<lat>&lon=<lon>`: reverse lookup
//!
//! Nominatim encodes coordinates as strings.

use crate::client::{ProfinderClient, Service};
use crate::error::{ApiError, ApiResult};
use profinder_geo::Coordinate;
use profinder_search::Place;
use serde::Deserialize;

/// Geocoding API interface
#[derive(Clone)]
pub struct GeocodingApi {
    client: ProfinderClient,
}

impl GeocodingApi {
    pub(crate) fn new(client: ProfinderClient) -> Self {
        Self { client }
    }

    /// Matches for a free-text address, best first
    pub async fn search(&self, address: &str) -> ApiResult<Vec<SearchHit>> {
        self.client
            .get(Service::Geocoder, "search", &[("format", "json"), ("q", address)])
            .await
    }

    /// Label for a coordinate
    pub async fn reverse(&self, coordinate: Coordinate) -> ApiResult<ReverseHit> {
        let lat = coordinate.latitude.to_string();
        let lon = coordinate.longitude.to_string();
        self.client
            .get(
                Service::Geocoder,
                "reverse",
                &[("format", "json"), ("lat", &lat), ("lon", &lon)],
            )
            .await
    }
}

/// One forward geocoding match
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

impl SearchHit {
    /// Parse the string coordinates into a [`Place`]
    pub fn to_place(&self) -> ApiResult<Place> {
        let latitude = parse_coord("lat", &self.lat)?;
        let longitude = parse_coord("lon", &self.lon)?;
        Ok(Place {
            coordinate: Coordinate::new(latitude, longitude),
            label: self.display_name.clone(),
        })
    }
}

fn parse_coord(field: &str, value: &str) -> ApiResult<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::malformed(format!("{field} is not a number: {value:?}")))
}

/// Reverse geocoding answer
///
/// Nominatim replies `{"error": "Unable to geocode"}` when nothing is found.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReverseHit {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
