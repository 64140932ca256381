use std::sync::Arc;

use crate::{
    models::{ClassifiedReviews, MovieId},
    services::{backend::RecommendationBackend, loading::LoadingFlag, review_cache::ReviewCache},
};

/// Loads classified reviews for the detail page, cache first
#[derive(Clone)]
pub struct ReviewFlow {
    backend: Arc<dyn RecommendationBackend>,
}

impl ReviewFlow {
    pub fn new(backend: Arc<dyn RecommendationBackend>) -> Self {
        Self { backend }
    }

    /// Returns the reviews, or `None` when none could be obtained.
    ///
    /// A cached response is used without touching the network. Otherwise the
    /// classifier is called and a successful response is cached. Failures are
    /// logged only.
    pub async fn load(
        &self,
        cache: &ReviewCache,
        movie_id: MovieId,
        loading: &LoadingFlag,
    ) -> Option<ClassifiedReviews> {
        let _loading = loading.begin();

        match cache.lookup(movie_id).await {
            Ok(Some(cached)) => {
                tracing::debug!(movie_id, "Review cache hit");
                return cached.classified_reviews;
            }
            Ok(None) => tracing::debug!(movie_id, "Review cache miss"),
            Err(e) => {
                tracing::error!(error = %e, movie_id, "Error fetching reviews");
                return None;
            }
        }

        let reply = match self.backend.classify_reviews(&movie_id.to_string()).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, movie_id, "Error fetching reviews");
                return None;
            }
        };

        if !reply.status.is_success() {
            tracing::warn!(movie_id, message = ?reply.message, "Review classification unsuccessful");
            return None;
        }

        if let Err(e) = cache.store(movie_id, &reply).await {
            tracing::error!(error = %e, movie_id, "Failed to cache classified reviews");
        }

        reply.classified_reviews
    }
}
