//! Two-phase radius search: spatial lookup, hydration, filter, annotate.

use crate::error::{Result, SearchError, SearchPhase};
use crate::model::{
    Category, CategoryId, ProfessionalId, ProfessionalRecord, ProfessionalWithDistance, SearchOptions, SearchQuery,
};
use crate::ports::ProfessionalStore;
use profinder_geo::{annotate, retain_within_radius, sort_by_distance, Coordinate, Distance};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument, warn};

/// Finds professionals around a point using a [`ProfessionalStore`].
///
/// The store's spatial index decides who is in range; this type hydrates the
/// candidates, applies the category filter and attaches display distances.
/// It never retries: a failed round-trip surfaces as
/// [`SearchError::SearchFailed`].
pub struct RadiusSearch<S> {
    store: S,
    options: SearchOptions,
}

impl<S: ProfessionalStore> RadiusSearch<S> {
    /// Create a search over `store` with default options.
    pub fn new(store: S) -> Self {
        Self {
            store,
            options: SearchOptions::default(),
        }
    }

    /// Builder-style method to set post-processing options
    #[must_use]
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current options.
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Search around `center`, if one has been established.
    ///
    /// Without a center this is the "not yet searched" state: an empty list
    /// comes back and the store is not contacted.
    pub async fn search_professionals_by_radius(
        &self,
        center: Option<Coordinate>,
        radius_km: f64,
        category: Option<&CategoryId>,
    ) -> Result<Vec<ProfessionalWithDistance>> {
        let Some(center) = center else {
            debug!("No search center yet, skipping store lookup");
            return Ok(Vec::new());
        };

        let query = SearchQuery::new(center, radius_km)?.with_category(category.cloned());
        self.search(&query).await
    }

    /// Run a validated query.
    ///
    /// Results are ordered nearest first; professionals without a location
    /// come last with [`Distance::Unknown`].
    #[instrument(
        skip(self, query),
        fields(
            lat = query.center.latitude,
            lng = query.center.longitude,
            radius_km = query.radius_km,
            category = query.category.as_ref().map(CategoryId::as_str),
        )
    )]
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<ProfessionalWithDistance>> {
        let candidates = self
            .store
            .professionals_in_radius(query.center, query.radius_km)
            .await
            .map_err(|e| SearchError::search_failed(SearchPhase::RadiusLookup, e))?;

        if candidates.is_empty() {
            debug!("No professionals in range");
            return Ok(Vec::new());
        }

        let ids = unique_ids(candidates.into_iter().map(|c| c.id));
        debug!(candidates = ids.len(), "Radius lookup complete, hydrating");

        let hydrated = self
            .store
            .professionals_by_ids(&ids)
            .await
            .map_err(|e| SearchError::search_failed(SearchPhase::Hydration, e))?;

        let records = reconcile(&ids, hydrated)
            .into_iter()
            .filter(|record| query.category.as_ref().map_or(true, |c| record.in_category(c)))
            .collect();

        let mut results = self.annotate(&query.center, records);

        if self.options.verify_radius {
            retain_within_radius(
                &mut results,
                query.radius_km,
                self.options.include_unknown_distance,
                |r| r.distance,
            );
        } else if !self.options.include_unknown_distance {
            results.retain(|r| r.distance.is_known());
        }

        sort_by_distance(&mut results, |r| r.distance);

        info!(results = results.len(), "Radius search complete");
        Ok(results)
    }

    /// All categories, ordered by name.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.store
            .categories()
            .await
            .map_err(|e| SearchError::search_failed(SearchPhase::Categories, e))
    }

    /// Browse one category, with distances when an origin is known.
    #[instrument(skip(self))]
    pub async fn professionals_by_category(
        &self,
        category: &CategoryId,
        origin: Option<Coordinate>,
    ) -> Result<Vec<ProfessionalWithDistance>> {
        let records = self
            .store
            .professionals_by_category(category)
            .await
            .map_err(|e| SearchError::search_failed(SearchPhase::CategoryBrowse, e))?;

        let Some(origin) = origin else {
            return Ok(without_distance(records));
        };

        let mut results = self.annotate(&origin, records);
        sort_by_distance(&mut results, |r| r.distance);
        Ok(results)
    }

    /// The `limit` newest professionals, newest first.
    ///
    /// Distances are filled in when an origin is known but do not change
    /// the order.
    #[instrument(skip(self))]
    pub async fn recent(&self, limit: usize, origin: Option<Coordinate>) -> Result<Vec<ProfessionalWithDistance>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let records = self
            .store
            .recent_professionals(limit)
            .await
            .map_err(|e| SearchError::search_failed(SearchPhase::Recent, e))?;
        debug!(records = records.len(), "Fetched recent professionals");

        Ok(match origin {
            Some(origin) => self.annotate(&origin, records),
            None => without_distance(records),
        })
    }

    fn annotate(&self, origin: &Coordinate, records: Vec<ProfessionalRecord>) -> Vec<ProfessionalWithDistance> {
        annotate(origin, records)
            .into_iter()
            .map(|(professional, distance)| ProfessionalWithDistance { professional, distance })
            .collect()
    }
}

fn without_distance(records: Vec<ProfessionalRecord>) -> Vec<ProfessionalWithDistance> {
    records
        .into_iter()
        .map(|professional| ProfessionalWithDistance {
            professional,
            distance: Distance::Unknown,
        })
        .collect()
}

/// Deduplicate while keeping first-seen order.
fn unique_ids(ids: impl IntoIterator<Item = ProfessionalId>) -> Vec<ProfessionalId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// Match hydrated records back to the phase-one identifiers.
///
/// Output follows `ids` order. An identifier the store failed to hydrate is
/// logged and dropped; records nobody asked for are ignored.
fn reconcile(ids: &[ProfessionalId], hydrated: Vec<ProfessionalRecord>) -> Vec<ProfessionalRecord> {
    let mut by_id: HashMap<ProfessionalId, ProfessionalRecord> =
        hydrated.into_iter().map(|r| (r.id.clone(), r)).collect();

    let records: Vec<ProfessionalRecord> = ids
        .iter()
        .filter_map(|id| {
            let record = by_id.remove(id);
            if record.is_none() {
                warn!(professional_id = %id, "Radius candidate missing from hydration, dropping");
            }
            record
        })
        .collect();

    if !by_id.is_empty() {
        debug!(extra = by_id.len(), "Ignoring hydrated records that were not candidates");
    }

    records
}
