use serde::{Deserialize, Serialize};

pub mod movie;
pub mod review;

pub use movie::{Movie, MovieId};
pub use review::{ClassifiedReview, ClassifiedReviews, Sentiment};

/// Outcome reported in every backend response envelope
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    #[serde(other)]
    Error,
}

impl ResponseStatus {
    pub fn is_success(self) -> bool {
        self == ResponseStatus::Success
    }
}

// ============================================================================
// Personalized recommendation (POST /recommend)
// ============================================================================

/// Keyword filters for a personalized recommendation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InputKeywords {
    #[serde(rename = "Genres", default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
}

impl InputKeywords {
    /// Derives filters from the visitor's interaction history.
    ///
    /// Every interaction with at least one genre overwrites the filter with its
    /// first genre, so the most recent one wins.
    pub fn from_interactions(interactions: &[Movie]) -> Self {
        let mut keywords = Self::default();
        for interaction in interactions {
            if let Some(genre) = interaction.first_genre() {
                keywords.genres = Some(vec![genre.to_string()]);
            }
        }
        keywords
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendRequest {
    pub input_keywords: InputKeywords,
    pub top_k: usize,
}

/// One ranked result set from the semantic search backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationSet {
    pub results: Vec<Movie>,
    #[serde(default)]
    pub scores: Vec<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub recommendations: Vec<RecommendationSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// Global ranking (GET /get_sorted_movies)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SortedMoviesResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub sorted_movies: Vec<Movie>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// Review classification (POST /classify_reviews)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifyReviewsRequest {
    pub id: String,
}

/// Response body of the classifier; cached verbatim per movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifyReviewsResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classified_reviews: Option<ClassifiedReviews>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_use_first_genre_of_interaction() {
        let interactions = vec![Movie::new(1, "Alien").with_genres(&["Horror", "Sci-Fi"])];
        let keywords = InputKeywords::from_interactions(&interactions);
        assert_eq!(keywords.genres, Some(vec!["Horror".to_string()]));
    }

    #[test]
    fn test_keywords_last_interaction_with_genre_wins() {
        let interactions = vec![
            Movie::new(1, "Alien").with_genres(&["Horror"]),
            Movie::new(2, "Heat").with_genres(&["Crime"]),
            Movie::new(3, "Untagged"),
        ];
        let keywords = InputKeywords::from_interactions(&interactions);
        assert_eq!(keywords.genres, Some(vec!["Crime".to_string()]));
    }

    #[test]
    fn test_keywords_without_genres_serialize_as_empty_object() {
        let request = RecommendRequest {
            input_keywords: InputKeywords::from_interactions(&[Movie::new(1, "Untagged")]),
            top_k: 9,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, serde_json::json!({"input_keywords": {}, "top_k": 9}));
    }

    #[test]
    fn test_recommend_response_deserialization() {
        let json = r#"{
            "status": "success",
            "recommendations": [
                {"results": [{"id": 2, "Title": "Heat"}], "scores": [0.91], "confidence": 0.93}
            ]
        }"#;
        let response: RecommendResponse = serde_json::from_str(json).unwrap();
        assert!(response.status.is_success());
        assert_eq!(response.recommendations[0].results[0].title, "Heat");
    }

    #[test]
    fn test_error_envelope_deserialization() {
        let json = r#"{"status": "error", "message": "No input keywords provided"}"#;
        let response: SortedMoviesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, ResponseStatus::Error);
        assert!(response.sorted_movies.is_empty());
        assert_eq!(response.message.as_deref(), Some("No input keywords provided"));
    }

    #[test]
    fn test_unexpected_status_is_error() {
        let response: ClassifyReviewsResponse =
            serde_json::from_str(r#"{"status": "pending"}"#).unwrap();
        assert!(!response.status.is_success());
        assert!(response.classified_reviews.is_none());
    }
}
