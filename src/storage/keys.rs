use std::fmt::Display;

use crate::models::MovieId;

/// Name of the cache that holds classified review responses
pub const REVIEW_CACHE: &str = "review-cache";

/// Keys of the entries a visitor keeps in durable storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Most recently opened movie (single slot)
    Interactions,
    /// Globally ranked list shown before any interaction
    RankedMovies,
    /// Classified reviews, keyed by the request that produced them
    ReviewCache(MovieId),
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::Interactions => write!(f, "interactions"),
            StorageKey::RankedMovies => write!(f, "rankedMovies"),
            StorageKey::ReviewCache(id) => {
                write!(f, "{}:/classify_reviews?id={}", REVIEW_CACHE, id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_display_interactions() {
        assert_eq!(StorageKey::Interactions.to_string(), "interactions");
    }

    #[test]
    fn test_storage_key_display_ranked_movies() {
        assert_eq!(StorageKey::RankedMovies.to_string(), "rankedMovies");
    }

    #[test]
    fn test_storage_key_display_review_cache() {
        let key = StorageKey::ReviewCache(42);
        assert_eq!(format!("{}", key), "review-cache:/classify_reviews?id=42");
    }
}
