use crate::{
    error::AppResult,
    models::{ClassifyReviewsResponse, MovieId},
    storage::{ClientStorage, StorageKey},
};

/// Classified review responses, keyed by movie
///
/// Entries never expire; a movie is classified at most once per visitor.
#[derive(Clone)]
pub struct ReviewCache {
    storage: ClientStorage,
}

impl ReviewCache {
    pub fn new(storage: ClientStorage) -> Self {
        Self { storage }
    }

    pub async fn lookup(&self, movie_id: MovieId) -> AppResult<Option<ClassifyReviewsResponse>> {
        self.storage.read(&StorageKey::ReviewCache(movie_id)).await
    }

    /// Stores a classifier response; responses without `success` status are skipped
    pub async fn store(&self, movie_id: MovieId, bundle: &ClassifyReviewsResponse) -> AppResult<()> {
        if !bundle.status.is_success() {
            tracing::debug!(movie_id, "Not caching unsuccessful classification");
            return Ok(());
        }
        self.storage
            .write(&StorageKey::ReviewCache(movie_id), bundle)
            .await
    }
}
