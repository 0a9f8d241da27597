/// End-to-end query pipeline for the article search engine: a mini
/// query-language parser, a metadata filter layer, a multi-signal
/// reranker, chunk-to-article deduplication, and the orchestrating
/// search engine that ties them to a vector index and an article store.
pub mod dedup;
pub mod engine;
pub mod filter;
pub mod models;
pub mod query;
pub mod rerank;
pub mod traits;

pub use dedup::{dedup_to_articles, DedupedCandidate};
pub use engine::SearchEngine;
pub use filter::{apply_filters, DateRange, FilterSpec};
pub use models::{SearchResponse, SearchResult};
pub use query::{parse_query, ParsedQuery};
pub use rerank::{rerank, RerankCandidate};
pub use traits::ArticleLookup;
