//! Current-position lookup with a bounded wait.

use crate::error::{LocationError, Result};
use crate::model::Place;
use crate::ports::{Geocoder, LocationProvider};
use async_trait::async_trait;
use profinder_geo::{Coordinate, GeoError};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// How long to wait for a position fix.
pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Ask `provider` for the current position, giving up after `timeout`.
///
/// A fix outside valid coordinate ranges is treated as a provider failure.
#[instrument(skip(provider))]
pub async fn current_location<P>(provider: &P, timeout: Duration) -> Result<Coordinate>
where
    P: LocationProvider + ?Sized,
{
    let fix = tokio::time::timeout(timeout, provider.current_position())
        .await
        .map_err(|_| LocationError::Timeout(timeout))??;

    if !fix.is_valid() {
        return Err(LocationError::InvalidFix(GeoError::InvalidCoordinate(fix.to_string())).into());
    }

    debug!(%fix, "Position acquired");
    Ok(fix)
}

/// Current position plus a display label from reverse geocoding.
///
/// Reverse geocoding is best effort: if it fails or finds nothing, the
/// label is the coordinate itself.
pub async fn locate_current<P, G>(provider: &P, geocoder: &G, timeout: Duration) -> Result<Place>
where
    P: LocationProvider + ?Sized,
    G: Geocoder + ?Sized,
{
    let coordinate = current_location(provider, timeout).await?;

    let label = match geocoder.reverse(coordinate).await {
        Ok(Some(label)) => label,
        Ok(None) => coordinate.to_string(),
        Err(e) => {
            warn!(error = %e, "Reverse geocoding failed, using coordinates as label");
            coordinate.to_string()
        }
    };

    info!(%coordinate, %label, "Located");
    Ok(Place { coordinate, label })
}

/// Provider that always reports the same position.
///
/// Useful on hosts without positioning hardware, where the position comes
/// from configuration instead.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider(pub Coordinate);

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_position(&self) -> std::result::Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// Provider for hosts with no positioning capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLocationProvider;

#[async_trait]
impl LocationProvider for UnavailableLocationProvider {
    async fn current_position(&self) -> std::result::Result<Coordinate, LocationError> {
        Err(LocationError::NoSensor)
    }
}
