use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::SessionId,
    models::{ClassifiedReview, Movie, MovieId},
    services::{
        remaining_movies, HomeFeed, InteractionStore, ReviewCache, ScreenSize, SearchState,
        SessionStatus,
    },
    storage::ClientStorage,
};

use super::AppState;

/// Credits shown per section on the detail page
const CREDITS_SHOWN: usize = 5;

const NO_REVIEWS: &str = "No reviews.";

// Request/Response types

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub screen_size: ScreenSize,
    pub heading: &'static str,
    #[serde(flatten)]
    pub feed: HomeFeed,
    /// Catalog movies not already recommended; only once the visitor has history
    pub also_like: Option<Vec<Movie>>,
}

#[derive(Debug, Serialize)]
pub struct MovieDetail {
    pub id: MovieId,
    pub title: String,
    pub year: Option<u32>,
    pub poster: Option<String>,
    pub synopsis: Option<String>,
    pub genres: Vec<String>,
    pub directors: Option<Vec<String>>,
    pub writers: Option<Vec<String>>,
    pub cast: Vec<String>,
}

impl From<&Movie> for MovieDetail {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: movie.year,
            poster: movie.poster.clone(),
            synopsis: movie.synopsis.clone(),
            genres: movie.genres.clone(),
            directors: movie.credited_directors().map(<[String]>::to_vec),
            writers: movie
                .credited_writers()
                .map(|writers| writers.iter().take(CREDITS_SHOWN).cloned().collect()),
            cast: movie.cast.iter().take(CREDITS_SHOWN).cloned().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DescriptionResponse {
    pub screen_size: ScreenSize,
    pub movie: MovieDetail,
    pub reviews: Option<Vec<ClassifiedReview>>,
    /// Shown in place of reviews when none could be loaded
    pub reviews_placeholder: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct SearchInputRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub state: SearchState,
    pub no_results: bool,
}

impl From<SearchState> for SearchResponse {
    fn from(state: SearchState) -> Self {
        Self {
            no_results: state.no_results(),
            state,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ViewportRequest {
    pub width: u32,
}

#[derive(Debug, Serialize)]
pub struct ViewportResponse {
    pub width: u32,
    pub screen_size: ScreenSize,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Home page: recommendations plus the rest of the catalog
pub async fn home(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Json<HomeResponse> {
    let session = state.session(session_id).await;

    let feed = state
        .recommendations
        .bootstrap(&session.storage, &session.home_loading)
        .await;

    let also_like = feed
        .user_history
        .then(|| remaining_movies(&state.catalog, &feed.recommendations));
    let heading = if feed.user_history {
        "Tailored for you:"
    } else {
        "You might like:"
    };

    Json(HomeResponse {
        screen_size: session.screen.current(),
        heading,
        feed,
        also_like,
    })
}

/// Detail page: records the visit, then loads classified reviews
pub async fn description(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(id): Path<String>,
) -> AppResult<Json<DescriptionResponse>> {
    let movie = id
        .trim()
        .parse::<MovieId>()
        .ok()
        .and_then(|movie_id| state.catalog.get(movie_id))
        .ok_or_else(|| AppError::NotFound(format!("Movie {}", id)))?;

    let session = state.session(session_id).await;

    InteractionStore::new(session.storage.clone())
        .record_interaction(movie)
        .await;

    let reviews = state
        .reviews
        .load(
            &ReviewCache::new(session.storage.clone()),
            movie.id,
            &session.reviews_loading,
        )
        .await
        .map(|bundle| bundle.reviews);

    Ok(Json(DescriptionResponse {
        screen_size: session.screen.current(),
        movie: MovieDetail::from(movie),
        reviews_placeholder: reviews.is_none().then_some(NO_REVIEWS),
        reviews,
    }))
}

/// One keystroke in the search box
pub async fn search_input(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(request): Json<SearchInputRequest>,
) -> Json<SearchResponse> {
    let session = state.session(session_id).await;
    Json(session.search.input(&request.query).into())
}

/// Current contents of the search box; an unknown visitor sees an empty box
pub async fn search_state(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Json<SearchResponse> {
    let search = match state.existing_session(session_id).await {
        Some(session) => session.search.snapshot(),
        None => SearchState::default(),
    };
    Json(search.into())
}

/// Resize event from the visitor's viewport
pub async fn resize_viewport(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(request): Json<ViewportRequest>,
) -> AppResult<Json<ViewportResponse>> {
    if request.width == 0 {
        return Err(AppError::InvalidInput(
            "Viewport width must be positive".to_string(),
        ));
    }

    let session = state.session(session_id).await;
    session.viewport.resize(request.width);

    Ok(Json(ViewportResponse {
        width: session.viewport.width(),
        screen_size: session.screen.current(),
    }))
}

/// The visitor's interaction history, read straight from storage
pub async fn get_interactions(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Json<Vec<Movie>> {
    let storage = ClientStorage::new(state.store.clone(), &session_id);
    Json(InteractionStore::new(storage).read_interactions().await)
}

/// Loading flags of the visitor's flows
pub async fn get_status(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Json<SessionStatus> {
    let status = state
        .existing_session(session_id)
        .await
        .map(|session| session.status())
        .unwrap_or_default();
    Json(status)
}
