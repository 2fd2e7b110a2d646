//! Address to coordinate resolution.

use crate::error::{GeocodingFailure, Result};
use crate::model::Place;
use crate::ports::Geocoder;
use profinder_geo::GeoError;
use tracing::{debug, instrument};

/// Resolve a free-text address to its first geocoder match.
///
/// Blank input is rejected without contacting the service.
#[instrument(skip(geocoder))]
pub async fn resolve_address<G>(geocoder: &G, address: &str) -> Result<Place>
where
    G: Geocoder + ?Sized,
{
    let address = address.trim();
    if address.is_empty() {
        return Err(GeocodingFailure::EmptyAddress.into());
    }

    let place = geocoder
        .forward(address)
        .await
        .map_err(GeocodingFailure::Transport)?
        .ok_or_else(|| GeocodingFailure::NotFound(address.to_string()))?;

    if !place.coordinate.is_valid() {
        let reason = GeoError::InvalidCoordinate(place.coordinate.to_string());
        return Err(GeocodingFailure::InvalidCoordinate(reason).into());
    }

    debug!(coordinate = %place.coordinate, label = %place.label, "Address resolved");
    Ok(place)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PortError, SearchError};
    use async_trait::async_trait;
    use profinder_geo::Coordinate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TableGeocoder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Geocoder for TableGeocoder {
        async fn forward(&self, address: &str) -> std::result::Result<Option<Place>, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match address {
                "Alexanderplatz, Berlin" => Ok(Some(Place {
                    coordinate: Coordinate::new(52.5219, 13.4132),
                    label: "Alexanderplatz, Mitte, Berlin".into(),
                })),
                "Null Island" => Ok(Some(Place {
                    coordinate: Coordinate::new(0.0, 0.0),
                    label: "Null Island".into(),
                })),
                "Broken" => Ok(Some(Place {
                    coordinate: Coordinate::new(f64::NAN, 0.0),
                    label: "Broken".into(),
                })),
                "Offline" => Err("connection refused".into()),
                _ => Ok(None),
            }
        }

        async fn reverse(&self, _coordinate: Coordinate) -> std::result::Result<Option<String>, PortError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_resolves_first_match() {
        let geocoder = TableGeocoder::default();
        let place = resolve_address(&geocoder, "  Alexanderplatz, Berlin ").await.unwrap();
        assert_eq!(place.coordinate, Coordinate::new(52.5219, 13.4132));
        assert_eq!(place.label, "Alexanderplatz, Mitte, Berlin");
    }

    #[tokio::test]
    async fn test_zero_coordinates_are_valid() {
        let geocoder = TableGeocoder::default();
        let place = resolve_address(&geocoder, "Null Island").await.unwrap();
        assert_eq!(place.coordinate, Coordinate::new(0.0, 0.0));
    }

    #[tokio::test]
    async fn test_blank_address_skips_service() {
        let geocoder = TableGeocoder::default();
        let err = resolve_address(&geocoder, "   ").await.unwrap_err();

        assert!(matches!(err, SearchError::GeocodingFailed(GeocodingFailure::EmptyAddress)));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failures() {
        let geocoder = TableGeocoder::default();

        let err = resolve_address(&geocoder, "Atlantis").await.unwrap_err();
        assert!(matches!(err, SearchError::GeocodingFailed(GeocodingFailure::NotFound(ref a)) if a == "Atlantis"));

        let err = resolve_address(&geocoder, "Offline").await.unwrap_err();
        assert!(matches!(err, SearchError::GeocodingFailed(GeocodingFailure::Transport(_))));

        let err = resolve_address(&geocoder, "Broken").await.unwrap_err();
        assert!(matches!(err, SearchError::GeocodingFailed(GeocodingFailure::InvalidCoordinate(_))));
    }
}
