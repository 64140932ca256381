use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;

use crate::models::{Movie, MovieId};

/// The static movie catalog, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    by_id: HashMap<MovieId, usize>,
}

impl Catalog {
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let by_id = movies
            .iter()
            .enumerate()
            .map(|(index, movie)| (movie.id, index))
            .collect();
        Self { movies, by_id }
    }

    /// Loads the catalog from a JSON array of movie records
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let movies: Vec<Movie> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;

        tracing::info!(movies = movies.len(), path = %path.display(), "Catalog loaded");

        Ok(Self::from_movies(movies))
    }

    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.by_id.get(&id).map(|&index| &self.movies[index])
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Case-insensitive substring match on titles, in catalog order
    pub fn search_titles(&self, needle: &str) -> Vec<Movie> {
        let needle = needle.to_lowercase();
        self.movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_movies(vec![
            Movie::new(0, "The Matrix"),
            Movie::new(1, "Matrix Reloaded"),
            Movie::new(7, "Heat"),
        ])
    }

    #[test]
    fn test_get_by_id() {
        let catalog = catalog();
        assert_eq!(catalog.get(7).map(|m| m.title.as_str()), Some("Heat"));
        assert!(catalog.get(3).is_none());
    }

    #[test]
    fn test_search_titles_is_case_insensitive() {
        let results = catalog().search_titles("MATRIX");
        let ids: Vec<_> = results.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_search_titles_no_match() {
        assert!(catalog().search_titles("zzz").is_empty());
    }

    #[test]
    fn test_load_bundled_catalog() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/movies.json");
        let catalog = Catalog::load(path).unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load("/nonexistent/movies.json").unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("Failed to read catalog /nonexistent/movies.json"));
    }
}
