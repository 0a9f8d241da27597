//! Adapters that satisfy the trait boundaries the core crates define:
//! embedding backends under `embeddings`, the axum HTTP surface under `http`.

pub mod embeddings;
pub mod http;

pub use embeddings::{LocalEmbeddingAdapter, LocalEmbeddingConfig, OnnxEmbeddingAdapter, OnnxEmbeddingConfig};
pub use http::{AppState, HttpServer, ServerConfig};
