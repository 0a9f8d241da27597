use crate::models::{VectorDoc, VectorDocMeta, VectorHit};
use crate::traits::VectorIndex;
use archive_core::{ArchiveError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Exact-scan, in-memory vector index. At the corpus sizes this system
/// targets, a full linear scan over L2-normalizable f32 vectors is cheap
/// enough that an approximate index would only add incremental-upsert risk
/// for no latency benefit.
pub struct InMemoryVectorIndex {
    docs: Arc<RwLock<HashMap<String, VectorDoc>>>,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self {
            docs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.docs.write().await.clear();
    }
}

impl Default for InMemoryVectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn upsert(&self, doc_id: String, metadata: VectorDocMeta, embedding: Vec<f32>) -> Result<()> {
        let mut docs = self.docs.write().await;
        docs.insert(
            doc_id.clone(),
            VectorDoc {
                id: doc_id,
                embedding,
                metadata,
            },
        );
        Ok(())
    }

    async fn delete(&self, doc_id: &str) -> Result<()> {
        self.docs.write().await.remove(doc_id);
        Ok(())
    }

    async fn search(&self, query_vector: &[f32], k: usize) -> Result<Vec<VectorHit>> {
        let docs = self.docs.read().await;
        let mut hits: Vec<VectorHit> = docs
            .values()
            .map(|doc| VectorHit {
                doc_id: doc.id.clone(),
                score: cosine_similarity(query_vector, &doc.embedding),
                metadata: doc.metadata.clone(),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        Ok(hits)
    }

    async fn save(&self, path: &Path) -> Result<()> {
        let docs = self.docs.read().await;
        let snapshot: Vec<&VectorDoc> = docs.values().collect();
        let bytes = bincode::serialize(&snapshot)
            .map_err(|e| ArchiveError::serialization(e.to_string()))?;
        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| ArchiveError::internal(format!("writing vector index snapshot: {e}")))?;
        Ok(())
    }

    async fn load(&self, path: &Path) -> Result<()> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ArchiveError::internal(format!("reading vector index snapshot: {e}")))?;
        let snapshot: Vec<VectorDoc> = bincode::deserialize(&bytes)
            .map_err(|e| ArchiveError::serialization(e.to_string()))?;

        let mut docs = self.docs.write().await;
        docs.clear();
        for doc in snapshot {
            docs.insert(doc.id.clone(), doc);
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.docs.read().await.len())
    }
}

/// Raw cosine similarity in `[-1, 1]`. Not clamped: the reranker and filter
/// layer need the sign and true magnitude, not a saturated `[0, 1]` score.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(article_id: i64) -> VectorDocMeta {
        VectorDocMeta {
            article_id,
            title: format!("article {article_id}"),
            source: "test-source".to_string(),
            author: None,
            published_date: None,
            is_chunk: false,
            chunk_index: 0,
        }
    }

    #[tokio::test]
    async fn upsert_replaces_existing_doc_with_same_id() {
        let index = InMemoryVectorIndex::new();
        index.upsert("a_1".to_string(), meta(1), vec![1.0, 0.0]).await.unwrap();
        index.upsert("a_1".to_string(), meta(1), vec![0.0, 1.0]).await.unwrap();
        assert_eq!(index.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let index = InMemoryVectorIndex::new();
        index.delete("a_missing").await.unwrap();
        index.upsert("a_1".to_string(), meta(1), vec![1.0, 0.0]).await.unwrap();
        index.delete("a_1").await.unwrap();
        index.delete("a_1").await.unwrap();
        assert_eq!(index.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn search_orders_by_score_descending_and_truncates() {
        let index = InMemoryVectorIndex::new();
        index.upsert("a_1".to_string(), meta(1), vec![1.0, 0.0]).await.unwrap();
        index.upsert("a_2".to_string(), meta(2), vec![0.9, 0.1]).await.unwrap();
        index.upsert("a_3".to_string(), meta(3), vec![0.0, 1.0]).await.unwrap();

        let hits = index.search(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].doc_id, "a_1");
        assert_eq!(hits[1].doc_id, "a_2");
        assert!(hits[0].score >= hits[1].score);
    }

    #[tokio::test]
    async fn opposite_vectors_score_negative() {
        let index = InMemoryVectorIndex::new();
        index.upsert("a_1".to_string(), meta(1), vec![1.0, 0.0]).await.unwrap();
        let hits = index.search(&[-1.0, 0.0], 1).await.unwrap();
        assert!(hits[0].score < 0.0);
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.bin");

        let index = InMemoryVectorIndex::new();
        index.upsert("a_1".to_string(), meta(1), vec![1.0, 0.0, 0.5]).await.unwrap();
        index.upsert("c_1_0".to_string(), meta(1), vec![0.2, 0.8, 0.1]).await.unwrap();
        index.save(&path).await.unwrap();

        let restored = InMemoryVectorIndex::new();
        restored.load(&path).await.unwrap();
        assert_eq!(restored.count().await.unwrap(), 2);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
