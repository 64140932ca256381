use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::{
    middleware::SessionId,
    services::{
        catalog::Catalog,
        loading::LoadingFlag,
        screen_size::{ScreenSizeObserver, Viewport},
        search::SearchSession,
    },
    storage::{ClientStorage, KeyValueStore},
};

/// Everything the server holds on behalf of one visitor
pub struct Session {
    pub id: SessionId,
    pub storage: ClientStorage,
    pub viewport: Viewport,
    pub screen: ScreenSizeObserver,
    pub search: SearchSession,
    pub home_loading: LoadingFlag,
    pub reviews_loading: LoadingFlag,
}

impl Session {
    pub fn new(
        id: SessionId,
        store: Arc<dyn KeyValueStore>,
        catalog: Arc<Catalog>,
        viewport_width: u32,
        search_quiet_period: Duration,
    ) -> Self {
        let viewport = Viewport::new(viewport_width);
        let screen = ScreenSizeObserver::attach(&viewport);

        Self {
            id,
            storage: ClientStorage::new(store, &id),
            viewport,
            screen,
            search: SearchSession::new(catalog, search_quiet_period),
            home_loading: LoadingFlag::new(),
            reviews_loading: LoadingFlag::new(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            home_loading: self.home_loading.is_loading(),
            reviews_loading: self.reviews_loading.is_loading(),
            search_loading: self.search.snapshot().loading,
        }
    }
}

/// Loading flags of a visitor's flows
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SessionStatus {
    pub home_loading: bool,
    pub reviews_loading: bool,
    pub search_loading: bool,
}
