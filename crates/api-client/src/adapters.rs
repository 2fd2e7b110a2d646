//! Search port implementations backed by [`ProfinderClient`].

use crate::client::ProfinderClient;
use async_trait::async_trait;
use profinder_geo::Coordinate;
use profinder_search::{
    Category, CategoryId, Geocoder, Place, PortError, ProfessionalId, ProfessionalRecord, ProfessionalStore,
    RadiusCandidate,
};
use tracing::debug;

/// [`ProfessionalStore`] over Supabase PostgREST.
#[derive(Clone)]
pub struct SupabaseStore {
    client: ProfinderClient,
}

impl SupabaseStore {
    pub fn new(client: ProfinderClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfessionalStore for SupabaseStore {
    async fn professionals_in_radius(
        &self,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<RadiusCandidate>, PortError> {
        let rows = self.client.professionals().in_radius(center, radius_km).await?;
        Ok(rows.into_iter().map(RadiusCandidate::from).collect())
    }

    async fn professionals_by_ids(
        &self,
        ids: &[ProfessionalId],
    ) -> Result<Vec<ProfessionalRecord>, PortError> {
        let rows = self.client.professionals().by_ids(ids).await?;
        Ok(rows.into_iter().map(ProfessionalRecord::from).collect())
    }

    async fn categories(&self) -> Result<Vec<Category>, PortError> {
        let rows = self.client.categories().list().await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn professionals_by_category(
        &self,
        category: &CategoryId,
    ) -> Result<Vec<ProfessionalRecord>, PortError> {
        let rows = self.client.professionals().by_category(category).await?;
        Ok(rows.into_iter().map(ProfessionalRecord::from).collect())
    }

    async fn recent_professionals(&self, limit: usize) -> Result<Vec<ProfessionalRecord>, PortError> {
        let rows = self.client.professionals().recent(limit).await?;
        debug!(rows = rows.len(), "Fetched recent professionals");
        Ok(rows.into_iter().map(ProfessionalRecord::from).collect())
    }
}

/// [`Geocoder`] over Nominatim.
#[derive(Clone)]
pub struct NominatimGeocoder {
    client: ProfinderClient,
}

impl NominatimGeocoder {
    pub fn new(client: ProfinderClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn forward(&self, address: &str) -> Result<Option<Place>, PortError> {
        let hits = self.client.geocoding().search(address).await?;
        debug!(matches = hits.len(), "Forward geocoding answered");

        match hits.first() {
            Some(hit) => Ok(Some(hit.to_place()?)),
            None => Ok(None),
        }
    }

    async fn reverse(&self, coordinate: Coordinate) -> Result<Option<String>, PortError> {
        let hit = self.client.geocoding().reverse(coordinate).await?;
        if let Some(reason) = hit.error {
            debug!(%reason, "Reverse geocoding found nothing");
        }
        Ok(hit.display_name.filter(|name| !name.is_empty()))
    }
}
