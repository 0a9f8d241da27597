//! HTTP route handlers: translate JSON requests into calls against the
//! search engine, article store, and indexing service, and map `ArchiveError`
//! into the appropriate status code on the way back out.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use archive_core::{ArchiveError, AuthorStat, Pagination, SourceStat, StoreStats};
use archive_observability::HealthAggregator;
use archive_search::{ArticleLookup, DateRange, FilterSpec, SearchEngine, SearchResponse};

use crate::indexing_service::{IndexReport, IndexingService};
use crate::store::{ArticleStore, NewArticle};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub search_engine: Arc<SearchEngine>,
    pub store: Arc<ArticleStore>,
    pub indexing_service: Arc<IndexingService>,
    pub health: Arc<HealthAggregator>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/search", post(search))
        .route("/sources", get(sources))
        .route("/authors", get(top_authors))
        .route("/stats", get(stats))
        .route("/health", get(health))
        .route("/articles", post(ingest_articles))
        .route("/index/build", post(build_index))
        .route("/index/update", post(update_index))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    query: String,
    #[serde(default)]
    filters: FilterRequest,
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct FilterRequest {
    source: Option<String>,
    author: Option<String>,
    date_range: Option<String>,
    custom_start: Option<NaiveDate>,
    custom_end: Option<NaiveDate>,
}

impl FilterRequest {
    fn into_spec(self) -> Result<FilterSpec, AppError> {
        let date_range = match (self.date_range, self.custom_start, self.custom_end) {
            (Some(name), _, _) => Some(DateRange::parse(&name)?),
            (None, Some(start), Some(end)) => Some(DateRange::Custom { start, end }),
            (None, None, None) => None,
            _ => return Err(ArchiveError::malformed_filter("custom_start and custom_end must both be present").into()),
        };

        Ok(FilterSpec { source: self.source, author: self.author, date_range })
    }
}

async fn search(State(state): State<AppState>, Json(request): Json<SearchRequest>) -> Result<Json<SearchResponse>, AppError> {
    let filter = request.filters.into_spec()?;
    let limit = request.limit.unwrap_or(10).min(Pagination::MAX_LIMIT);
    let response = state.search_engine.search(&request.query, filter, limit, request.offset.unwrap_or(0)).await?;
    Ok(Json(response))
}

async fn sources(State(state): State<AppState>) -> Result<Json<Vec<SourceStat>>, AppError> {
    Ok(Json(state.store.list_sources().await?))
}

#[derive(Debug, Deserialize)]
struct TopAuthorsQuery {
    min_count: Option<usize>,
}

async fn top_authors(State(state): State<AppState>, Query(query): Query<TopAuthorsQuery>) -> Result<Json<Vec<AuthorStat>>, AppError> {
    Ok(Json(state.store.top_authors(query.min_count.unwrap_or(1)).await?))
}

async fn stats(State(state): State<AppState>) -> Result<Json<StoreStats>, AppError> {
    Ok(Json(state.store.stats().await?))
}

async fn health(State(state): State<AppState>) -> Json<archive_observability::HealthReport> {
    Json(state.health.check().await)
}

#[derive(Debug, Deserialize)]
struct ArticleIngestRequest {
    url: String,
    stable_id: String,
    title: String,
    content: String,
    summary: Option<String>,
    source: String,
    author: Option<String>,
    published_date: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    terms: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
}

impl From<ArticleIngestRequest> for NewArticle {
    fn from(request: ArticleIngestRequest) -> Self {
        NewArticle {
            url: request.url,
            stable_id: request.stable_id,
            title: request.title,
            content: request.content,
            summary: request.summary,
            source: request.source,
            author: request.author,
            published_date: request.published_date,
            terms: request.terms,
            tags: request.tags,
        }
    }
}

#[derive(Debug, Serialize)]
struct IngestResponse {
    inserted: usize,
}

async fn ingest_articles(State(state): State<AppState>, Json(batch): Json<Vec<ArticleIngestRequest>>) -> Result<Json<IngestResponse>, AppError> {
    let batch: Vec<NewArticle> = batch.into_iter().map(NewArticle::from).collect();
    let inserted = state.store.upsert_articles(batch).await?;
    Ok(Json(IngestResponse { inserted }))
}

async fn build_index(State(state): State<AppState>) -> Result<Json<IndexReport>, AppError> {
    Ok(Json(state.indexing_service.build().await?))
}

async fn update_index(State(state): State<AppState>) -> Result<Json<IndexReport>, AppError> {
    Ok(Json(state.indexing_service.update().await?))
}

#[derive(Debug)]
pub struct AppError(ArchiveError);

impl From<ArchiveError> for AppError {
    fn from(err: ArchiveError) -> Self {
        Self(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            ArchiveError::QueryTooLong { .. } | ArchiveError::MalformedFilter { .. } | ArchiveError::MalformedId { .. } | ArchiveError::Validation { .. } => StatusCode::BAD_REQUEST,
            ArchiveError::NotFound { .. } => StatusCode::NOT_FOUND,
            ArchiveError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ArchiveError::Overloaded => StatusCode::SERVICE_UNAVAILABLE,
            ArchiveError::IndexUnavailable { .. } | ArchiveError::StoreUnavailable { .. } | ArchiveError::IndexStoreMismatch { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ArchiveError::Configuration { .. } | ArchiveError::Serialization { .. } | ArchiveError::Io { .. } | ArchiveError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}
