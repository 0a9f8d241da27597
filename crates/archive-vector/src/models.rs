use archive_core::DateTime;
use archive_core::Utc;
use serde::{Deserialize, Serialize};

/// The metadata dictionary carried alongside each embedding. Deliberately
/// thin: full text lives in the article store and is fetched on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorDocMeta {
    pub article_id: i64,
    pub title: String,
    pub source: String,
    pub author: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub is_chunk: bool,
    pub chunk_index: usize,
}

/// A stored embedding plus its metadata, keyed by a stable string id
/// (`a_{n}` / `c_{n}_{i}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorDoc {
    pub id: String,
    pub embedding: Vec<f32>,
    pub metadata: VectorDocMeta,
}

/// One hit from a top-k cosine search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorHit {
    pub doc_id: String,
    pub score: f32,
    pub metadata: VectorDocMeta,
}
