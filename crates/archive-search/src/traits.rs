use crate::filter::FilterSpec;
use archive_core::{Article, AuthorStat, Result, SourceStat, StoreStats};
use async_trait::async_trait;
use std::collections::HashMap;

/// The read surface the search engine needs from the article store. The
/// store itself (and the write side: upsert/chunk replace/indexed flags)
/// lives in the indexing service; the engine only ever reads.
#[async_trait]
pub trait ArticleLookup: Send + Sync {
    async fn get_articles(&self, ids: &[i64]) -> Result<HashMap<i64, Article>>;

    /// Evaluates source/author/date predicates against the full candidate
    /// id set, returning the surviving ids. Implementations may push this
    /// down into the store; this trait only specifies the result.
    async fn filter_candidates(&self, ids: &[i64], filter: &FilterSpec) -> Result<Vec<i64>>;

    async fn list_sources(&self) -> Result<Vec<SourceStat>>;
    async fn top_authors(&self, min_count: usize) -> Result<Vec<AuthorStat>>;
    async fn stats(&self) -> Result<StoreStats>;
}
