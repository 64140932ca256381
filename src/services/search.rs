use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::{models::Movie, services::catalog::Catalog};

/// Default quiet period between the last keystroke and filtering
pub const SEARCH_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Catalog titles matching the query, or nothing for a blank query
pub fn filter_catalog(catalog: &Catalog, query: &str) -> Vec<Movie> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    catalog.search_titles(query)
}

/// What the search box currently shows
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SearchState {
    /// Raw input, exactly as typed
    pub query: String,
    pub loading: bool,
    pub results: Vec<Movie>,
    #[serde(skip)]
    generation: u64,
}

impl SearchState {
    /// Settled on a non-empty query that matched nothing
    pub fn no_results(&self) -> bool {
        !self.loading && !self.query.is_empty() && self.results.is_empty()
    }
}

/// Debounced search-as-you-type over the catalog
///
/// Every keystroke records the raw input at once and restarts the quiet
/// period; only the keystroke that survives it gets filtered.
pub struct SearchSession {
    catalog: Arc<Catalog>,
    quiet_period: Duration,
    state: Arc<watch::Sender<SearchState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SearchSession {
    pub fn new(catalog: Arc<Catalog>, quiet_period: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            catalog,
            quiet_period,
            state: Arc::new(state),
            pending: Mutex::new(None),
        }
    }

    /// Handles one keystroke. Must be called from within a Tokio runtime.
    pub fn input(&self, raw: &str) -> SearchState {
        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            state.query = raw.to_string();
            state.loading = true;
            generation = state.generation;
        });

        let catalog = self.catalog.clone();
        let state = self.state.clone();
        let quiet_period = self.quiet_period;
        let query = raw.to_string();

        let task = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            let results = filter_catalog(&catalog, &query);
            state.send_if_modified(|current| {
                if current.generation != generation {
                    return false;
                }
                tracing::debug!(query = %query, results = results.len(), "Search settled");
                current.results = results;
                current.loading = false;
                true
            });
        });

        let superseded = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(task);
        if let Some(previous) = superseded {
            previous.abort();
        }

        self.snapshot()
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        if let Some(task) = self
            .pending
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
        {
            task.abort();
        }
    }
}
