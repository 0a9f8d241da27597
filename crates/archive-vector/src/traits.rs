use crate::models::{VectorDocMeta, VectorHit};
use archive_core::Result;
use async_trait::async_trait;
use std::path::Path;

/// Dense embedding store: upsert/delete by stable string id, top-k cosine
/// search, and whole-index persistence.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Idempotent: replaces any existing document under `doc_id`.
    async fn upsert(&self, doc_id: String, metadata: VectorDocMeta, embedding: Vec<f32>) -> Result<()>;

    /// Idempotent: returns `Ok(())` whether or not `doc_id` was present.
    async fn delete(&self, doc_id: &str) -> Result<()>;

    /// Top-k by cosine similarity, descending. Cosine scores lie in
    /// `[-1, 1]`; they are not clamped to `[0, 1]`.
    async fn search(&self, query_vector: &[f32], k: usize) -> Result<Vec<VectorHit>>;

    async fn save(&self, path: &Path) -> Result<()>;
    async fn load(&self, path: &Path) -> Result<()>;
    async fn count(&self) -> Result<usize>;
}

/// The single pluggable embedding backend. `embed` may batch internally;
/// `dimension` must match every vector it returns.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
    fn dimension(&self) -> usize;
    fn model_identifier(&self) -> &str;
}
