use crate::{
    models::Movie,
    storage::{ClientStorage, StorageKey},
};

/// Most interactions kept per visitor
pub const INTERACTION_CAPACITY: usize = 1;

/// The visitor's history of opened movies
///
/// Holds at most [`INTERACTION_CAPACITY`] distinct movies; opening a new one
/// evicts the oldest. Storage failures are logged, never returned.
#[derive(Clone)]
pub struct InteractionStore {
    storage: ClientStorage,
}

impl InteractionStore {
    pub fn new(storage: ClientStorage) -> Self {
        Self { storage }
    }

    /// Stored interactions, oldest first; empty when absent or unreadable
    pub async fn read_interactions(&self) -> Vec<Movie> {
        match self.storage.read(&StorageKey::Interactions).await {
            Ok(interactions) => interactions.unwrap_or_default(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read interactions");
                Vec::new()
            }
        }
    }

    /// Remembers a movie the visitor opened.
    ///
    /// A movie already in the history leaves the store untouched.
    pub async fn record_interaction(&self, movie: &Movie) {
        let mut interactions = self.read_interactions().await;

        if interactions.iter().any(|interaction| interaction.id == movie.id) {
            tracing::debug!(movie_id = movie.id, "Interaction already recorded");
            return;
        }

        interactions.push(movie.clone());
        if interactions.len() > INTERACTION_CAPACITY {
            let overflow = interactions.len() - INTERACTION_CAPACITY;
            interactions.drain(..overflow);
        }

        match self.storage.write(&StorageKey::Interactions, &interactions).await {
            Ok(()) => tracing::info!(movie_id = movie.id, "Interaction recorded"),
            Err(e) => tracing::error!(error = %e, movie_id = movie.id, "Failed to record interaction"),
        }
    }
}
