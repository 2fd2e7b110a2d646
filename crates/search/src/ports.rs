//! Contracts for the external collaborators: data store, geocoder and device position.
//!
//! The HTTP adapters live in `profinder-api-client`; tests use in-memory
//! implementations.

use crate::error::{LocationError, PortError};
use crate::model::{Category, CategoryId, Place, ProfessionalId, ProfessionalRecord, RadiusCandidate};
use async_trait::async_trait;
use profinder_geo::Coordinate;
use std::sync::Arc;

/// Geospatial data store holding professionals.
#[async_trait]
pub trait ProfessionalStore: Send + Sync {
    /// Spatial index lookup: candidates whose stored location lies within
    /// `radius_km` of `center`. Filtering happens server-side.
    async fn professionals_in_radius(
        &self,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<RadiusCandidate>, PortError>;

    /// Full profile-joined records for exactly these identifiers.
    async fn professionals_by_ids(
        &self,
        ids: &[ProfessionalId],
    ) -> Result<Vec<ProfessionalRecord>, PortError>;

    /// All service categories, ordered by name.
    async fn categories(&self) -> Result<Vec<Category>, PortError>;

    /// Every professional in one category.
    async fn professionals_by_category(
        &self,
        category: &CategoryId,
    ) -> Result<Vec<ProfessionalRecord>, PortError>;

    /// Up to `limit` professionals, newest first.
    async fn recent_professionals(&self, limit: usize) -> Result<Vec<ProfessionalRecord>, PortError>;
}

/// Forward and reverse geocoding.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// First match for a free-text address.
    async fn forward(&self, address: &str) -> Result<Option<Place>, PortError>;

    /// Human label for a coordinate.
    async fn reverse(&self, coordinate: Coordinate) -> Result<Option<String>, PortError>;
}

/// The platform's positioning capability.
///
/// Implementations may suspend until the platform answers; the caller
/// enforces the timeout.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Current device position.
    async fn current_position(&self) -> Result<Coordinate, LocationError>;
}

#[async_trait]
impl<T: ProfessionalStore + ?Sized> ProfessionalStore for Arc<T> {
    async fn professionals_in_radius(
        &self,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<RadiusCandidate>, PortError> {
        (**self).professionals_in_radius(center, radius_km).await
    }

    async fn professionals_by_ids(
        &self,
        ids: &[ProfessionalId],
    ) -> Result<Vec<ProfessionalRecord>, PortError> {
        (**self).professionals_by_ids(ids).await
    }

    async fn categories(&self) -> Result<Vec<Category>, PortError> {
        (**self).categories().await
    }

    async fn professionals_by_category(
        &self,
        category: &CategoryId,
    ) -> Result<Vec<ProfessionalRecord>, PortError> {
        (**self).professionals_by_category(category).await
    }

    async fn recent_professionals(&self, limit: usize) -> Result<Vec<ProfessionalRecord>, PortError> {
        (**self).recent_professionals(limit).await
    }
}
