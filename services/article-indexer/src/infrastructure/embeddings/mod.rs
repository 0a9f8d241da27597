//! Concrete `archive_vector::EmbeddingBackend` implementations: a local ONNX
//! model for production use, and a hash-based stand-in for tests and
//! environments with no model file configured.

pub mod local_adapter;
pub mod onnx_adapter;

pub use local_adapter::{LocalEmbeddingAdapter, LocalEmbeddingConfig};
pub use onnx_adapter::{OnnxEmbeddingAdapter, OnnxEmbeddingConfig};
