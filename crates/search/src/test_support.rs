//! In-memory store and fixtures shared by the unit tests.

use crate::error::PortError;
use crate::model::{Category, CategoryId, ProfessionalId, ProfessionalRecord, RadiusCandidate};
use crate::ports::ProfessionalStore;
use async_trait::async_trait;
use profinder_geo::{distance_km, Coordinate, Location, EARTH_RADIUS_KM};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub fn berlin() -> Coordinate {
    Coordinate::new(52.52, 13.405)
}

/// Move `km` due north along the meridian.
pub fn offset_km(from: Coordinate, km: f64) -> Coordinate {
    Coordinate::new(from.latitude + (km / EARTH_RADIUS_KM).to_degrees(), from.longitude)
}

pub fn professional(id: &str, category: &str, at: Option<Coordinate>) -> ProfessionalRecord {
    ProfessionalRecord::new(id, Location::from(at)).with_category(category)
}

/// A store backed by a vector.
///
/// The radius lookup returns located records inside the radius (plus any
/// configured slack) and every unlocated record, mimicking a server that
/// joins unlocated rows in. Records count as created in vector order.
#[derive(Default)]
pub struct MockStore {
    records: Vec<ProfessionalRecord>,
    missing: HashSet<ProfessionalId>,
    slack_km: f64,
    delay: Duration,
    radius_calls: AtomicUsize,
    hydrate_calls: AtomicUsize,
    fail_radius: AtomicBool,
    fail_hydrate: AtomicBool,
    gates: Mutex<Vec<(f64, Arc<Notify>)>>,
}

impl MockStore {
    pub fn new(records: Vec<ProfessionalRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Leave this id out of hydration responses.
    pub fn missing_on_hydrate(mut self, id: &str) -> Self {
        self.missing.insert(ProfessionalId::new(id));
        self
    }

    pub fn with_slack_km(mut self, slack_km: f64) -> Self {
        self.slack_km = slack_km;
        self
    }

    /// Sleep this long in every radius lookup.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Hold radius lookups for `radius_km` until the returned handle is notified.
    pub fn gate(&self, radius_km: f64) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().unwrap().push((radius_km, Arc::clone(&notify)));
        notify
    }

    pub fn fail_radius(&self, fail: bool) {
        self.fail_radius.store(fail, Ordering::SeqCst);
    }

    pub fn fail_hydrate(&self, fail: bool) {
        self.fail_hydrate.store(fail, Ordering::SeqCst);
    }

    pub fn radius_calls(&self) -> usize {
        self.radius_calls.load(Ordering::SeqCst)
    }

    pub fn hydrate_calls(&self) -> usize {
        self.hydrate_calls.load(Ordering::SeqCst)
    }

    fn gate_for(&self, radius_km: f64) -> Option<Arc<Notify>> {
        self.gates
            .lock()
            .unwrap()
            .iter()
            .find(|(r, _)| *r == radius_km)
            .map(|(_, n)| Arc::clone(n))
    }
}

#[async_trait]
impl ProfessionalStore for MockStore {
    async fn professionals_in_radius(
        &self,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<RadiusCandidate>, PortError> {
        self.radius_calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(gate) = self.gate_for(radius_km) {
            gate.notified().await;
        }
        if self.fail_radius.load(Ordering::SeqCst) {
            return Err("spatial index unavailable".into());
        }

        let limit = radius_km + self.slack_km;
        Ok(self
            .records
            .iter()
            .filter(|r| match r.location.coordinate() {
                Some(at) => distance_km(&center, &at) <= limit,
                None => true,
            })
            .map(|r| RadiusCandidate::new(r.id.clone()))
            .collect())
    }

    async fn professionals_by_ids(
        &self,
        ids: &[ProfessionalId],
    ) -> Result<Vec<ProfessionalRecord>, PortError> {
        self.hydrate_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_hydrate.load(Ordering::SeqCst) {
            return Err("professionals table unavailable".into());
        }

        // Reverse order: callers must not rely on the store's ordering
        Ok(self
            .records
            .iter()
            .rev()
            .filter(|r| ids.contains(&r.id) && !self.missing.contains(&r.id))
            .cloned()
            .collect())
    }

    async fn categories(&self) -> Result<Vec<Category>, PortError> {
        let mut seen = HashSet::new();
        let mut categories: Vec<Category> = self
            .records
            .iter()
            .filter_map(|r| r.category_id.clone())
            .filter(|c| seen.insert(c.clone()))
            .map(|id| Category {
                name: id.as_str().to_string(),
                id,
                description: None,
                icon: None,
            })
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn professionals_by_category(
        &self,
        category: &CategoryId,
    ) -> Result<Vec<ProfessionalRecord>, PortError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.in_category(category))
            .cloned()
            .collect())
    }

    async fn recent_professionals(&self, limit: usize) -> Result<Vec<ProfessionalRecord>, PortError> {
        Ok(self.records.iter().rev().take(limit).cloned().collect())
    }
}
