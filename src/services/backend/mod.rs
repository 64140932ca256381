//! Recommendation backend abstraction
//!
//! The backend owns the ranking and sentiment models. This crate only calls
//! its three endpoints, so every flow depends on this trait rather than on an
//! HTTP client.

use crate::{
    error::AppResult,
    models::{ClassifyReviewsResponse, RecommendRequest, RecommendResponse, SortedMoviesResponse},
};

pub mod http_backend;

pub use http_backend::HttpBackend;

/// Trait for the recommendation/sentiment backend
///
/// Each call returns the backend's response envelope. Transport failures and
/// non-2xx replies are errors; an envelope whose status is not `success` is
/// returned as-is so callers can decide what it means for them.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Personalized recommendations for a keyword filter
    async fn recommend(&self, request: &RecommendRequest) -> AppResult<RecommendResponse>;

    /// Globally ranked movie list
    async fn sorted_movies(&self) -> AppResult<SortedMoviesResponse>;

    /// Sentiment-classified reviews for one movie
    async fn classify_reviews(&self, movie_id: &str) -> AppResult<ClassifyReviewsResponse>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
