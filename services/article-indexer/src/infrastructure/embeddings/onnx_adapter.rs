//! An `EmbeddingBackend` backed by a local ONNX sentence-embedding model.
//!
//! The model and tokenizer are loaded from a directory on disk; this adapter
//! never fetches anything over the network. Pointing `model_dir` at a
//! downloaded `bge-base-en-v1.5`-shaped export (a `model.onnx` plus a
//! `tokenizer.json`) is the expected deployment.

use archive_core::{ArchiveError, Result};
use archive_vector::EmbeddingBackend;
use async_trait::async_trait;
use ndarray::Array2;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

pub struct OnnxEmbeddingConfig {
    pub model_dir: std::path::PathBuf,
    pub dimension: usize,
    pub model_identifier: String,
    pub max_sequence_length: usize,
}

/// Wraps a single ONNX Runtime session behind a mutex: `ort::Session::run`
/// takes `&mut self`, and one session is shared across every embedding call
/// the indexing service and search engine make.
pub struct OnnxEmbeddingAdapter {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    config: OnnxEmbeddingConfig,
}

impl OnnxEmbeddingAdapter {
    pub fn load(config: OnnxEmbeddingConfig) -> Result<Self> {
        if config.dimension == 0 {
            return Err(ArchiveError::configuration("embedding dimension must be greater than 0"));
        }

        let model_path = config.model_dir.join("model.onnx");
        let tokenizer_path = config.model_dir.join("tokenizer.json");

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.commit_from_file(&model_path))
            .map_err(|e| ArchiveError::configuration(format!("loading onnx model from {}: {e}", model_path.display())))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ArchiveError::configuration(format!("loading tokenizer from {}: {e}", tokenizer_path.display())))?;

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            config,
        })
    }

    fn encode_batch(&self, texts: &[String]) -> Result<(Array2<i64>, Array2<i64>)> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| ArchiveError::internal(format!("tokenizing batch: {e}")))?;

        let max_len = encodings.iter().map(|e| e.get_ids().len()).max().unwrap_or(0).min(self.config.max_sequence_length).max(1);

        let mut input_ids = Array2::<i64>::zeros((texts.len(), max_len));
        let mut attention_mask = Array2::<i64>::zeros((texts.len(), max_len));

        for (row, encoding) in encodings.iter().enumerate() {
            for (col, (&id, &mask)) in encoding.get_ids().iter().zip(encoding.get_attention_mask().iter()).enumerate() {
                if col >= max_len {
                    break;
                }
                input_ids[[row, col]] = id as i64;
                attention_mask[[row, col]] = mask as i64;
            }
        }

        Ok((input_ids, attention_mask))
    }

    /// Mean-pools token embeddings over non-padding positions, then
    /// normalizes each row to unit length. This is the standard pooling
    /// strategy for sentence-embedding models exported without a built-in
    /// pooling head.
    fn mean_pool(&self, token_embeddings: &[f32], attention_mask: &Array2<i64>, batch_size: usize, seq_len: usize, hidden_size: usize) -> Vec<Vec<f32>> {
        let mut pooled = Vec::with_capacity(batch_size);

        for row in 0..batch_size {
            let mut sums = vec![0.0f32; hidden_size];
            let mut valid_tokens = 0.0f32;

            for col in 0..seq_len {
                if attention_mask[[row, col]] == 0 {
                    continue;
                }
                valid_tokens += 1.0;
                let offset = (row * seq_len + col) * hidden_size;
                for h in 0..hidden_size {
                    sums[h] += token_embeddings[offset + h];
                }
            }

            if valid_tokens > 0.0 {
                for value in sums.iter_mut() {
                    *value /= valid_tokens;
                }
            }

            let magnitude: f32 = sums.iter().map(|v| v * v).sum::<f32>().sqrt();
            if magnitude > 0.0 {
                for value in sums.iter_mut() {
                    *value /= magnitude;
                }
            }

            pooled.push(sums);
        }

        pooled
    }
}

#[async_trait]
impl EmbeddingBackend for OnnxEmbeddingAdapter {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let (input_ids, attention_mask) = self.encode_batch(texts)?;
        let (batch_size, seq_len) = (input_ids.shape()[0], input_ids.shape()[1]);

        let mut session = self.session.lock().await;
        let input_ids_tensor = Tensor::from_array(input_ids.clone()).map_err(|e| ArchiveError::internal(format!("building input_ids tensor: {e}")))?;
        let attention_mask_tensor = Tensor::from_array(attention_mask.clone()).map_err(|e| ArchiveError::internal(format!("building attention_mask tensor: {e}")))?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
            ])
            .map_err(|e| ArchiveError::internal(format!("running onnx inference: {e}")))?;

        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ArchiveError::internal(format!("extracting onnx output tensor: {e}")))?;

        let hidden_size = *shape.last().ok_or_else(|| ArchiveError::internal("onnx output tensor has no dimensions"))? as usize;

        Ok(self.mean_pool(data, &attention_mask, batch_size, seq_len, hidden_size))
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn model_identifier(&self) -> &str {
        &self.config.model_identifier
    }
}
