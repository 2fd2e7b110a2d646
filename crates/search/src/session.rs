//! Interactive search session with stale-response suppression.
//!
//! A user can fire a new search while an older one is still in flight. Every
//! search is tagged with a generation number when it starts; its results are
//! applied only if no newer search has been applied in the meantime. Later
//! generations always win, whatever order the responses arrive in.

use crate::error::SearchError;
use crate::model::{ProfessionalWithDistance, SearchQuery};
use crate::ports::ProfessionalStore;
use crate::radius::RadiusSearch;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};

/// Shared, immutable result list.
pub type Results = Arc<Vec<ProfessionalWithDistance>>;

/// What happened to one search when it finished.
#[derive(Debug)]
pub enum SearchOutcome {
    /// This search was the newest; its results are now current.
    Applied { generation: u64, results: Results },
    /// A newer search was started before this one finished. Its result,
    /// success or failure, was discarded.
    Stale { generation: u64, latest: u64 },
    /// This search was the newest but failed. The previously applied
    /// results are kept.
    Failed {
        generation: u64,
        error: SearchError,
        retained: Results,
    },
}

impl SearchOutcome {
    /// Generation of the search this outcome belongs to.
    pub fn generation(&self) -> u64 {
        match self {
            Self::Applied { generation, .. } | Self::Stale { generation, .. } | Self::Failed { generation, .. } => {
                *generation
            }
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }
}

#[derive(Debug, Default)]
struct SessionState {
    applied_generation: u64,
    results: Results,
}

/// Owns the current result list for one user-facing search surface.
pub struct SearchSession<S> {
    search: Arc<RadiusSearch<S>>,
    generation: AtomicU64,
    state: Mutex<SessionState>,
    /// Generation and abort handle of the newest submitted task
    in_flight: Mutex<Option<(u64, AbortHandle)>>,
}

impl<S: ProfessionalStore + 'static> SearchSession<S> {
    pub fn new(search: RadiusSearch<S>) -> Self {
        Self::from_shared(Arc::new(search))
    }

    pub fn from_shared(search: Arc<RadiusSearch<S>>) -> Self {
        Self {
            search,
            generation: AtomicU64::new(0),
            state: Mutex::new(SessionState::default()),
            in_flight: Mutex::new(None),
        }
    }

    /// The search this session drives.
    pub fn search(&self) -> &RadiusSearch<S> {
        &self.search
    }

    /// Allocate the next generation. Must be called when the user action
    /// happens, before any awaiting.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Newest generation handed out so far.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Results of the newest applied search.
    pub fn results(&self) -> Results {
        Arc::clone(&self.lock_state().results)
    }

    /// Start a search and wait for its outcome.
    ///
    /// Calls may overlap; the generation is taken before the first await so
    /// the call order decides which search is newest.
    pub async fn run(&self, query: SearchQuery) -> SearchOutcome {
        let generation = self.begin();
        self.run_generation(generation, query).await
    }

    /// Start a search on a background task, cancelling the previous one.
    ///
    /// The generation is taken and the in-flight handle swapped under one
    /// lock, so a task is only ever aborted by a newer one. A cancelled task
    /// never applies its results; the generation check is what protects
    /// results if an abort lands late.
    pub fn submit(self: &Arc<Self>, query: SearchQuery) -> JoinHandle<SearchOutcome> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);

        let generation = self.begin();
        let session = Arc::clone(self);
        let handle = tokio::spawn(async move { session.run_generation(generation, query).await });

        if let Some((previous, task)) = in_flight.replace((generation, handle.abort_handle())) {
            debug!(generation, previous, "Cancelling superseded search");
            task.abort();
        }

        handle
    }

    async fn run_generation(&self, generation: u64, query: SearchQuery) -> SearchOutcome {
        debug!(generation, radius_km = query.radius_km, "Search started");
        let result = self.search.search(&query).await;
        self.complete(generation, result)
    }

    /// Apply a finished search if it is still the newest one.
    ///
    /// The check and the write happen under one lock, so an older response
    /// can never overwrite a newer one. A generation that [`begin`](Self::begin)
    /// never handed out is refused.
    pub(crate) fn complete(
        &self,
        generation: u64,
        result: Result<Vec<ProfessionalWithDistance>, SearchError>,
    ) -> SearchOutcome {
        let latest = self.current_generation();
        let mut state = self.lock_state();

        if generation > latest {
            warn!(generation, latest, "Refusing result for a generation never started");
            return SearchOutcome::Stale { generation, latest };
        }
        if generation < latest || generation <= state.applied_generation {
            debug!(generation, latest, "Discarding stale search response");
            return SearchOutcome::Stale { generation, latest };
        }

        match result {
            Ok(results) => {
                let results = Arc::new(results);
                state.applied_generation = generation;
                state.results = Arc::clone(&results);
                SearchOutcome::Applied { generation, results }
            }
            Err(error) => {
                warn!(generation, error = %error, "Search failed, keeping previous results");
                SearchOutcome::Failed {
                    generation,
                    error,
                    retained: Arc::clone(&state.results),
                }
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
