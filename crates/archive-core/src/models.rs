use crate::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The unit of user interest: a long-form article ingested from a source feed.
///
/// Owned exclusively by the article store. `indexed`/`is_chunked`/
/// `embedding_version` are mutated only by the indexing service; every other
/// field is written once by the ingestion collaborator and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub id: i64,
    pub url: String,
    pub stable_id: String,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub source: String,
    pub author: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub ingested_at: DateTime<Utc>,
    pub word_count: usize,
    pub is_chunked: bool,
    pub indexed: bool,
    pub embedding_version: u32,
    pub terms: Vec<String>,
    pub tags: Vec<String>,
}

impl Article {
    /// Text the chunker operates on, unmodified; the indexing service applies
    /// title weighting separately when preparing text to embed.
    pub fn body(&self) -> &str {
        &self.content
    }
}

/// A contiguous sub-window of an article's content, produced when the article
/// exceeds the chunking threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    pub article_id: i64,
    pub chunk_index: usize,
    pub content: String,
    pub word_count: usize,
    pub start_char: usize,
}

/// A row in the author-statistics auxiliary table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthorStat {
    pub author: String,
    pub article_count: usize,
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
}

/// A row in the source/feed health auxiliary table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceStat {
    pub source: String,
    pub article_count: usize,
}

/// Aggregate counts exposed by `stats()`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StoreStats {
    pub article_count: usize,
    pub chunk_count: usize,
    pub indexed_count: usize,
    pub source_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded { message: String },
    Unhealthy { message: String },
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    pub fn is_unhealthy(&self) -> bool {
        matches!(self, HealthStatus::Unhealthy { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub component: String,
    pub status: HealthStatus,
    pub last_check: DateTime<Utc>,
    pub details: Option<HashMap<String, String>>,
}

/// Pagination parameters for the query API: `offset`/`limit`, not page numbers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 10,
        }
    }
}

impl Pagination {
    pub const MAX_LIMIT: usize = 100;

    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: limit.min(Self::MAX_LIMIT),
        }
    }
}
