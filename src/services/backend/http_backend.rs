//! HTTP client for the recommendation backend
//!
//! Endpoints:
//! 1. POST /recommend → semantic search over the catalog, filtered by keywords
//! 2. GET /get_sorted_movies → catalog ranked by review sentiment
//! 3. POST /classify_reviews → reviews of one movie with sentiment labels
//!
//! No request timeout is set: a hung backend keeps the caller waiting.

use crate::{
    error::{AppError, AppResult},
    models::{
        ClassifyReviewsRequest, ClassifyReviewsResponse, RecommendRequest, RecommendResponse,
        SortedMoviesResponse,
    },
    services::backend::RecommendationBackend,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    api_url: String,
}

impl HttpBackend {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    /// Decodes a reply, turning non-2xx statuses into errors
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Backend returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw backend response");

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize backend response");
            AppError::ExternalApi(format!("Failed to parse backend response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl RecommendationBackend for HttpBackend {
    async fn recommend(&self, request: &RecommendRequest) -> AppResult<RecommendResponse> {
        let response = self
            .http_client
            .post(self.endpoint("recommend"))
            .json(request)
            .send()
            .await?;

        let reply: RecommendResponse = Self::decode(response).await?;

        tracing::info!(
            top_k = request.top_k,
            sets = reply.recommendations.len(),
            backend = self.name(),
            "Recommendations fetched"
        );

        Ok(reply)
    }

    async fn sorted_movies(&self) -> AppResult<SortedMoviesResponse> {
        let response = self
            .http_client
            .get(self.endpoint("get_sorted_movies"))
            .send()
            .await?;

        let reply: SortedMoviesResponse = Self::decode(response).await?;

        tracing::info!(
            movies = reply.sorted_movies.len(),
            backend = self.name(),
            "Ranked movies fetched"
        );

        Ok(reply)
    }

    async fn classify_reviews(&self, movie_id: &str) -> AppResult<ClassifyReviewsResponse> {
        let response = self
            .http_client
            .post(self.endpoint("classify_reviews"))
            .json(&ClassifyReviewsRequest {
                id: movie_id.to_string(),
            })
            .send()
            .await?;

        let reply: ClassifyReviewsResponse = Self::decode(response).await?;

        tracing::info!(
            movie_id = %movie_id,
            reviews = reply.classified_reviews.as_ref().map_or(0, |r| r.reviews.len()),
            backend = self.name(),
            "Reviews classified"
        );

        Ok(reply)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
