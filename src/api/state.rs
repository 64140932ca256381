use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::{
    config::Config,
    middleware::SessionId,
    services::{Catalog, RecommendationBackend, RecommendationFlow, ReviewFlow, Session},
    storage::KeyValueStore,
};

/// Defaults applied to every new visitor session
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub viewport_width: u32,
    pub search_quiet_period: Duration,
    pub idle_timeout: Duration,
    pub max_sessions: usize,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            viewport_width: config.default_viewport_width,
            search_quiet_period: config.search_quiet_period(),
            idle_timeout: config.session_idle_timeout(),
            max_sessions: config.max_sessions,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            viewport_width: 1280,
            search_quiet_period: crate::services::search::SEARCH_QUIET_PERIOD,
            idle_timeout: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub store: Arc<dyn KeyValueStore>,
    pub recommendations: RecommendationFlow,
    pub reviews: ReviewFlow,
    pub settings: SessionSettings,
    pub inner: Arc<RwLock<AppStateInner>>,
}

/// Inner state that can be modified
pub struct AppStateInner {
    pub sessions: HashMap<SessionId, SessionEntry>,
}

pub struct SessionEntry {
    pub session: Arc<Session>,
    pub last_seen: Instant,
}

impl AppStateInner {
    /// Drops idle sessions, then the least recently seen ones until a new
    /// session fits under `max_sessions`
    fn evict(&mut self, now: Instant, settings: &SessionSettings) {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| now.duration_since(entry.last_seen) < settings.idle_timeout);

        while self.sessions.len() >= settings.max_sessions.max(1) {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    self.sessions.remove(&id);
                }
                None => break,
            }
        }

        let evicted = before - self.sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.sessions.len(), "Evicted sessions");
        }
    }
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        backend: Arc<dyn RecommendationBackend>,
        store: Arc<dyn KeyValueStore>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            catalog,
            store,
            recommendations: RecommendationFlow::new(backend.clone()),
            reviews: ReviewFlow::new(backend),
            settings,
            inner: Arc::new(RwLock::new(AppStateInner {
                sessions: HashMap::new(),
            })),
        }
    }

    /// Returns the visitor's session, creating it on first sight
    pub async fn session(&self, id: SessionId) -> Arc<Session> {
        let now = Instant::now();
        let mut inner = self.inner.write().await;
        if let Some(entry) = inner.sessions.get_mut(&id) {
            entry.last_seen = now;
            return entry.session.clone();
        }

        inner.evict(now, &self.settings);

        tracing::info!(session_id = %id, "New session");
        let session = Arc::new(Session::new(
            id,
            self.store.clone(),
            self.catalog.clone(),
            self.settings.viewport_width,
            self.settings.search_quiet_period,
        ));
        inner.sessions.insert(
            id,
            SessionEntry {
                session: session.clone(),
                last_seen: now,
            },
        );
        session
    }

    /// Returns the visitor's session only if one is already live
    pub async fn existing_session(&self, id: SessionId) -> Option<Arc<Session>> {
        let mut inner = self.inner.write().await;
        let entry = inner.sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(entry.session.clone())
    }

    pub async fn session_count(&self) -> usize {
        self.inner.read().await.sessions.len()
    }
}
