/// Exact-scan dense vector index for the article search engine.
///
/// Stores embeddings keyed by the stable string ids `archive-core::DocId`
/// produces, with idempotent upsert/delete, top-k cosine search, and
/// whole-index save/load. No keyword/BM25 state lives here; that signal is
/// computed by the reranker directly against fetched text.
pub mod index;
pub mod models;
pub mod traits;

pub use index::{cosine_similarity, InMemoryVectorIndex};
pub use models::{VectorDoc, VectorDocMeta, VectorHit};
pub use traits::{EmbeddingBackend, VectorIndex};
