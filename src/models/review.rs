use serde::{Deserialize, Serialize};

/// Sentiment label assigned to a review by the classifier
///
/// Labels other than the three known ones are kept verbatim so cached
/// bundles round-trip unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
    Other(String),
}

impl From<String> for Sentiment {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Positive" => Sentiment::Positive,
            "Negative" => Sentiment::Negative,
            "Neutral" => Sentiment::Neutral,
            _ => Sentiment::Other(label),
        }
    }
}

impl From<Sentiment> for String {
    fn from(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Positive => "Positive".to_string(),
            Sentiment::Negative => "Negative".to_string(),
            Sentiment::Neutral => "Neutral".to_string(),
            Sentiment::Other(label) => label,
        }
    }
}

/// A single review with its sentiment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifiedReview {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Review")]
    pub review: String,
    #[serde(rename = "Sentiment", default)]
    pub sentiment: Sentiment,
}

/// Classified reviews for one movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifiedReviews {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Reviews", default)]
    pub reviews: Vec<ClassifiedReview>,
}
