//! Home-page recommendation bootstrap.
//!
//! Runs once per page load and picks one of three sources:
//!
//! ```text
//! interactions stored?  ── yes ──▶ InteractionBased  POST /recommend (top_k = 9)
//!        │ no
//! ranked list stored?   ── yes ──▶ CachedRanked      no network call
//!        │ no
//!        └────────────────────────▶ FreshRanked       GET /get_sorted_movies, then persist
//! ```
//!
//! The personalized path neither reads nor writes the persisted ranked list.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    models::{InputKeywords, Movie, RecommendRequest},
    services::{
        backend::RecommendationBackend, catalog::Catalog, interactions::InteractionStore,
        loading::LoadingFlag,
    },
    storage::{ClientStorage, StorageKey},
};

/// Result count requested from the personalized endpoint
pub const RECOMMENDATION_TOP_K: usize = 9;

/// Cap on the "you might also like" list
pub const REMAINING_LIMIT: usize = 21;

const RECOMMEND_FAILED: &str = "Error fetching recommendations";
const SORTED_FAILED: &str = "Error fetching sorted movies";

/// Source of the home-page list, decided once per load
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapPlan {
    InteractionBased { keywords: InputKeywords },
    CachedRanked(Vec<Movie>),
    FreshRanked,
}

impl BootstrapPlan {
    /// Chooses the plan. `ranked` only matters when there are no interactions.
    pub fn select(interactions: &[Movie], ranked: Option<Vec<Movie>>) -> Self {
        if !interactions.is_empty() {
            return BootstrapPlan::InteractionBased {
                keywords: InputKeywords::from_interactions(interactions),
            };
        }
        match ranked {
            Some(movies) => BootstrapPlan::CachedRanked(movies),
            None => BootstrapPlan::FreshRanked,
        }
    }

    pub fn kind(&self) -> PlanKind {
        match self {
            BootstrapPlan::InteractionBased { .. } => PlanKind::InteractionBased,
            BootstrapPlan::CachedRanked(_) => PlanKind::CachedRanked,
            BootstrapPlan::FreshRanked => PlanKind::FreshRanked,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PlanKind {
    InteractionBased,
    CachedRanked,
    FreshRanked,
}

/// What the home page shows after bootstrap
#[derive(Debug, Clone, Serialize)]
pub struct HomeFeed {
    pub plan: PlanKind,
    /// The visitor has opened a movie before
    pub user_history: bool,
    pub recommendations: Vec<Movie>,
    /// Message for the visitor when a backend call failed
    pub alert: Option<String>,
}

impl HomeFeed {
    fn new(plan: PlanKind, user_history: bool) -> Self {
        Self {
            plan,
            user_history,
            recommendations: Vec::new(),
            alert: None,
        }
    }

    fn alert(&mut self, message: String) {
        tracing::warn!(alert = %message, "Alerting visitor");
        self.alert = Some(message);
    }
}

/// Catalog movies not already recommended, in catalog order, capped at 21
pub fn remaining_movies(catalog: &Catalog, recommendations: &[Movie]) -> Vec<Movie> {
    catalog
        .movies()
        .iter()
        .filter(|movie| !recommendations.iter().any(|r| r.id == movie.id))
        .take(REMAINING_LIMIT)
        .cloned()
        .collect()
}

#[derive(Clone)]
pub struct RecommendationFlow {
    backend: Arc<dyn RecommendationBackend>,
}

impl RecommendationFlow {
    pub fn new(backend: Arc<dyn RecommendationBackend>) -> Self {
        Self { backend }
    }

    /// Loads the home feed for one visitor. Never fails; problems end up in `alert`.
    pub async fn bootstrap(&self, storage: &ClientStorage, loading: &LoadingFlag) -> HomeFeed {
        let _loading = loading.begin();

        let interactions = InteractionStore::new(storage.clone())
            .read_interactions()
            .await;
        let ranked = if interactions.is_empty() {
            self.read_ranked(storage).await
        } else {
            None
        };

        let plan = BootstrapPlan::select(&interactions, ranked);
        let mut feed = HomeFeed::new(plan.kind(), !interactions.is_empty());

        tracing::info!(
            plan = ?feed.plan,
            interactions = interactions.len(),
            "Bootstrapping recommendations"
        );

        match plan {
            BootstrapPlan::InteractionBased { keywords } => {
                self.personalized(keywords, &mut feed).await
            }
            BootstrapPlan::CachedRanked(movies) => feed.recommendations = movies,
            BootstrapPlan::FreshRanked => self.fresh_ranked(storage, &mut feed).await,
        }

        feed
    }

    async fn read_ranked(&self, storage: &ClientStorage) -> Option<Vec<Movie>> {
        storage
            .read(&StorageKey::RankedMovies)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to read ranked movies");
                None
            })
    }

    async fn personalized(&self, keywords: InputKeywords, feed: &mut HomeFeed) {
        let request = RecommendRequest {
            input_keywords: keywords,
            top_k: RECOMMENDATION_TOP_K,
        };

        match self.backend.recommend(&request).await {
            Ok(reply) if reply.status.is_success() => {
                match reply.recommendations.into_iter().next() {
                    Some(first) => feed.recommendations = first.results,
                    None => {
                        tracing::error!("Backend returned no recommendation sets");
                        feed.alert(RECOMMEND_FAILED.to_string());
                    }
                }
            }
            Ok(reply) => {
                feed.alert(format!("Error: {}", reply.message.unwrap_or_default()));
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching recommendations");
                feed.alert(RECOMMEND_FAILED.to_string());
            }
        }
    }

    async fn fresh_ranked(&self, storage: &ClientStorage, feed: &mut HomeFeed) {
        match self.backend.sorted_movies().await {
            Ok(reply) if reply.status.is_success() => {
                if let Err(e) = storage
                    .write(&StorageKey::RankedMovies, &reply.sorted_movies)
                    .await
                {
                    tracing::error!(error = %e, "Failed to persist ranked movies");
                }
                feed.recommendations = reply.sorted_movies;
            }
            Ok(reply) => {
                tracing::warn!(message = ?reply.message, "Ranked movies request unsuccessful");
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching sorted movies");
                feed.alert(SORTED_FAILED.to_string());
            }
        }
    }
}
