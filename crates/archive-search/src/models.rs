use crate::query::ParsedQuery;
use archive_core::DateTime;
use archive_core::Utc;
use serde::{Deserialize, Serialize};

/// One article-level match, enriched with text needed for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub article_id: i64,
    pub title: String,
    pub url: String,
    pub source: String,
    pub author: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub excerpt: String,
    pub matched_phrase: Option<String>,
    pub matched_sections: usize,
    pub score: f32,
    pub tags: Vec<String>,
}

/// The full response to a `search` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub total: usize,
    pub query_time_ms: u64,
    pub parsed_query: ParsedQuery,
}
