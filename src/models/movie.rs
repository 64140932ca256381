use serde::{Deserialize, Deserializer, Serialize};

/// Catalog identifier of a movie
pub type MovieId = u64;

/// Marker the catalog uses for an empty credit list
const NO_CREDIT: &str = "None";

/// A movie record as it appears in the catalog and in backend responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default, deserialize_with = "lenient_year")]
    pub year: Option<u32>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Synopsis", default)]
    pub synopsis: Option<String>,
    #[serde(rename = "Genres", default, deserialize_with = "name_list")]
    pub genres: Vec<String>,
    #[serde(rename = "Director", default, deserialize_with = "name_list")]
    pub directors: Vec<String>,
    #[serde(rename = "Producers", default, deserialize_with = "name_list")]
    pub producers: Vec<String>,
    #[serde(rename = "Writers", default, deserialize_with = "name_list")]
    pub writers: Vec<String>,
    #[serde(rename = "Cast", default, deserialize_with = "name_list")]
    pub cast: Vec<String>,
    /// Sentiment score attached by the global ranking
    #[serde(rename = "Score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
}

impl Movie {
    /// Creates a bare movie with only an id and a title
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            year: None,
            poster: None,
            synopsis: None,
            genres: Vec::new(),
            directors: Vec::new(),
            producers: Vec::new(),
            writers: Vec::new(),
            cast: Vec::new(),
            score: None,
        }
    }

    pub fn with_genres(mut self, genres: &[&str]) -> Self {
        self.genres = genres.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn first_genre(&self) -> Option<&str> {
        self.genres.first().map(String::as_str)
    }

    /// Directors, or `None` when the catalog marks the credit as absent
    pub fn credited_directors(&self) -> Option<&[String]> {
        credited(&self.directors)
    }

    /// Writers, or `None` when the catalog marks the credit as absent
    pub fn credited_writers(&self) -> Option<&[String]> {
        credited(&self.writers)
    }
}

fn credited(names: &[String]) -> Option<&[String]> {
    match names {
        [] => None,
        [only] if only == NO_CREDIT => None,
        _ => Some(names),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NameList {
    List(Vec<String>),
    Joined(String),
}

/// Accepts `["a", "b"]`, `"a, b"` or `null`
fn name_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NameList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(NameList::List(names)) => names,
        Some(NameList::Joined(joined)) => joined
            .split(", ")
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearRepr {
    Number(u32),
    Text(String),
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<YearRepr>::deserialize(deserializer)? {
        Some(YearRepr::Number(year)) => Some(year),
        Some(YearRepr::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_record_deserialization() {
        let json = r#"{
            "id": 3,
            "Title": "Inception",
            "Year": 2010,
            "Poster": "https://img.example/inception.jpg",
            "Synopsis": "A thief who steals corporate secrets.",
            "Genres": ["Action", "Sci-Fi"],
            "Director": ["Christopher Nolan"],
            "Producers": ["Emma Thomas"],
            "Writers": ["Christopher Nolan"],
            "Cast": ["Leonardo DiCaprio", "Elliot Page"]
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 3);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.year, Some(2010));
        assert_eq!(movie.first_genre(), Some("Action"));
        assert_eq!(movie.cast.len(), 2);
        assert_eq!(movie.score, None);
    }

    #[test]
    fn test_joined_name_lists_are_split() {
        let json = r#"{"id": 1, "Title": "Heat", "Genres": "Crime, Drama", "Cast": "Al Pacino, Robert De Niro"}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.genres, vec!["Crime", "Drama"]);
        assert_eq!(movie.cast, vec!["Al Pacino", "Robert De Niro"]);
    }

    #[test]
    fn test_ranked_record_with_nulls() {
        let json = r#"{"id": 9, "Title": "Orphan", "Score": 14, "Genres": null, "Year": "2009", "Poster": null}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert!(movie.genres.is_empty());
        assert_eq!(movie.year, Some(2009));
        assert_eq!(movie.score, Some(14));
        assert_eq!(movie.first_genre(), None);
    }

    #[test]
    fn test_none_marker_hides_credits() {
        let mut movie = Movie::new(1, "Untitled");
        movie.directors = vec!["None".to_string()];
        movie.writers = vec!["Jane Doe".to_string()];
        assert_eq!(movie.credited_directors(), None);
        assert_eq!(movie.credited_writers().map(<[String]>::len), Some(1));
    }

    #[test]
    fn test_serializes_with_catalog_keys() {
        let movie = Movie::new(5, "Alien").with_genres(&["Horror"]);
        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["Title"], "Alien");
        assert_eq!(value["Genres"][0], "Horror");
        assert!(value.get("Score").is_none());
    }
}
