//! A deterministic, hash-based embedding backend with no external model
//! dependency. Used in tests and as a development fallback when no ONNX
//! model is configured; never selected in a default production config.

use archive_core::{ArchiveError, Result};
use archive_vector::EmbeddingBackend;
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct LocalEmbeddingConfig {
    pub dimension: usize,
    pub seed: u64,
}

impl Default for LocalEmbeddingConfig {
    fn default() -> Self {
        Self { dimension: 768, seed: 42 }
    }
}

/// Hashes each text into a unit vector. Same text, same seed, same vector;
/// no two distinct inputs are guaranteed distinct, but collisions are rare
/// enough not to matter for exercising the rest of the pipeline.
pub struct LocalEmbeddingAdapter {
    config: LocalEmbeddingConfig,
}

impl LocalEmbeddingAdapter {
    pub fn new(config: LocalEmbeddingConfig) -> Result<Self> {
        if config.dimension == 0 {
            return Err(ArchiveError::configuration("embedding dimension must be greater than 0"));
        }
        Ok(Self { config })
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0; self.config.dimension];
        let base_hash = self.hash_text(text);

        for (i, value) in embedding.iter_mut().enumerate() {
            let dimension_hash = self.hash_with_seed(base_hash, i as u64);
            *value = ((dimension_hash % 2000) as f32 - 1000.0) / 1000.0;
        }

        normalize(&mut embedding);
        embedding
    }

    fn hash_text(&self, text: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        self.config.seed.hash(&mut hasher);
        hasher.finish()
    }

    fn hash_with_seed(&self, base_hash: u64, seed: u64) -> u64 {
        let mut hasher = DefaultHasher::new();
        base_hash.hash(&mut hasher);
        seed.hash(&mut hasher);
        hasher.finish()
    }
}

fn normalize(vector: &mut [f32]) {
    let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude > 0.0 {
        for value in vector.iter_mut() {
            *value /= magnitude;
        }
    }
}

impl Default for LocalEmbeddingAdapter {
    fn default() -> Self {
        Self::new(LocalEmbeddingConfig::default()).expect("default dimension is non-zero")
    }
}

#[async_trait]
impl EmbeddingBackend for LocalEmbeddingAdapter {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn model_identifier(&self) -> &str {
        "local-deterministic"
    }
}
