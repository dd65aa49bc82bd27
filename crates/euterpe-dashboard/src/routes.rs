use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use euterpe_lang_english::Person;
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::pages;
use crate::state::DatasetCache;
use crate::stats::{self, SongMetric};

pub fn router(cache: Arc<DatasetCache>) -> Router {
    Router::new()
        .route("/", get(pages::pos_distribution))
        .route("/top-verbs", get(pages::top_verbs))
        .route("/top-pronouns", get(pages::top_pronouns))
        .route("/temporal", get(pages::temporal))
        .route("/song-stats", get(pages::song_stats))
        .route("/api/decades", get(decades))
        .route("/api/tags", get(tags))
        .route("/api/pos-distribution", get(pos_distribution))
        .route("/api/top-verbs", get(top_verbs))
        .route("/api/top-pronouns", get(top_pronouns))
        .route("/api/temporal", get(temporal))
        .route("/api/song-stats", get(song_stats))
        .route("/api/reload", post(reload))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(cache)
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Dataset(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Dataset(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Dataset(e) => {
                tracing::error!("Dataset unavailable: {e:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct DecadeQuery {
    decade: Option<String>,
    person: Option<Person>,
}

impl DecadeQuery {
    /// Empty or missing means all decades
    fn decade(&self) -> Result<Option<i32>, ApiError> {
        match self.decade.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| ApiError::BadRequest(format!("invalid decade: {raw}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TagsQuery {
    tags: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MetricQuery {
    #[serde(default)]
    metric: SongMetric,
}

async fn decades(State(cache): State<Arc<DatasetCache>>) -> ApiResult<Vec<i32>> {
    let data = cache.get().await?;
    Ok(Json(stats::decades(&data)))
}

async fn tags(State(cache): State<Arc<DatasetCache>>) -> ApiResult<Vec<String>> {
    let data = cache.get().await?;
    Ok(Json(stats::tags(&data)))
}

async fn pos_distribution(
    State(cache): State<Arc<DatasetCache>>,
    Query(query): Query<DecadeQuery>,
) -> ApiResult<Vec<stats::TagShare>> {
    let decade = query.decade()?;
    let data = cache.get().await?;
    Ok(Json(stats::pos_distribution(&data, decade)))
}

async fn top_verbs(
    State(cache): State<Arc<DatasetCache>>,
    Query(query): Query<DecadeQuery>,
) -> ApiResult<Vec<stats::TokenCount>> {
    let decade = query.decade()?;
    let data = cache.get().await?;
    Ok(Json(stats::top_verbs(&data, decade)))
}

async fn top_pronouns(
    State(cache): State<Arc<DatasetCache>>,
    Query(query): Query<DecadeQuery>,
) -> ApiResult<Vec<stats::TokenCount>> {
    let decade = query.decade()?;
    let data = cache.get().await?;
    let person = query.person.unwrap_or_default();
    Ok(Json(stats::top_pronouns(&data, decade, person)))
}

async fn temporal(
    State(cache): State<Arc<DatasetCache>>,
    Query(query): Query<TagsQuery>,
) -> ApiResult<Vec<stats::TemporalPoint>> {
    let data = cache.get().await?;
    let selected: Vec<String> = query
        .tags
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    let selected = stats::resolve_temporal_tags(&data, &selected);
    Ok(Json(stats::temporal(&data, &selected)))
}

async fn song_stats(
    State(cache): State<Arc<DatasetCache>>,
    Query(query): Query<MetricQuery>,
) -> ApiResult<Vec<stats::DecadeMean>> {
    let data = cache.get().await?;
    Ok(Json(stats::song_stats(&data, query.metric)))
}

async fn reload(State(cache): State<Arc<DatasetCache>>) -> ApiResult<serde_json::Value> {
    let data = cache.reload().await?;
    Ok(Json(json!({ "songs": data.songs.len() })))
}

async fn health() -> &'static str {
    "ok"
}
