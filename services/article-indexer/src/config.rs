//! Service-level configuration: the search/indexing `Config` record from
//! `archive_config`, plus the settings that only make sense at the service
//! boundary (HTTP bind address, storage paths, embedding backend choice).
//! The former is loaded through `archive_config`'s layered resolver; the
//! latter is read directly from the environment the way this service family
//! always has.

use archive_config::Config as EngineConfig;
use serde::{Deserialize, Serialize};

use crate::infrastructure::http::ServerConfig;

/// Top-level configuration for the `article-indexer` binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub embedding_backend: EmbeddingBackendConfig,
    pub engine: EngineConfig,
}

/// On-disk locations for the article store and vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub article_store_path: std::path::PathBuf,
    pub vector_index_path: std::path::PathBuf,
    pub embedding_version: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let base = dirs::home_dir().unwrap_or_else(|| std::path::PathBuf::from(".")).join(".article-indexer");
        Self {
            article_store_path: base.join("articles.db"),
            vector_index_path: base.join("vectors.bin"),
            embedding_version: 1,
        }
    }
}

/// Which concrete `EmbeddingBackend` the service wires up. `Local` needs no
/// configuration and is the default; `Onnx` requires a model directory
/// containing `model.onnx` and `tokenizer.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EmbeddingBackendConfig {
    Local,
    Onnx { model_dir: std::path::PathBuf, max_sequence_length: usize },
}

impl Default for EmbeddingBackendConfig {
    fn default() -> Self {
        EmbeddingBackendConfig::Local
    }
}

impl ServiceConfig {
    /// Assembles configuration from environment variables under the
    /// `ARTICLE_INDEXER_` prefix, falling back to sensible defaults, then
    /// delegates the search/reranking half to `archive_config::load_config`.
    pub fn from_env() -> archive_core::Result<Self> {
        let server = ServerConfig {
            host: std::env::var("ARTICLE_INDEXER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("ARTICLE_INDEXER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            timeout_seconds: std::env::var("ARTICLE_INDEXER_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            enable_cors: std::env::var("ARTICLE_INDEXER_ENABLE_CORS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            cors_origins: std::env::var("ARTICLE_INDEXER_CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        };

        let mut storage = StorageConfig::default();
        if let Ok(path) = std::env::var("ARTICLE_INDEXER_STORE_PATH") {
            storage.article_store_path = std::path::PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("ARTICLE_INDEXER_INDEX_PATH") {
            storage.vector_index_path = std::path::PathBuf::from(path);
        }
        if let Ok(version) = std::env::var("ARTICLE_INDEXER_EMBEDDING_VERSION") {
            storage.embedding_version = version.parse().map_err(|_| archive_core::ArchiveError::configuration("ARTICLE_INDEXER_EMBEDDING_VERSION must be an integer"))?;
        }

        let embedding_backend = match std::env::var("ARTICLE_INDEXER_EMBEDDING_BACKEND").unwrap_or_else(|_| "local".to_string()).as_str() {
            "onnx" => EmbeddingBackendConfig::Onnx {
                model_dir: std::env::var("ARTICLE_INDEXER_ONNX_MODEL_DIR").map(std::path::PathBuf::from).map_err(|_| archive_core::ArchiveError::configuration("ARTICLE_INDEXER_ONNX_MODEL_DIR is required when ARTICLE_INDEXER_EMBEDDING_BACKEND=onnx"))?,
                max_sequence_length: std::env::var("ARTICLE_INDEXER_ONNX_MAX_SEQ_LEN").ok().and_then(|v| v.parse().ok()).unwrap_or(256),
            },
            _ => EmbeddingBackendConfig::Local,
        };

        let engine = archive_config::load_config().map_err(|e| archive_core::ArchiveError::configuration(e.to_string()))?;

        let config = ServiceConfig { server, storage, embedding_backend, engine };
        config.validate()?;
        Ok(config)
    }

    /// Loads the engine's search/reranking configuration from a TOML file
    /// (environment variables still take precedence), keeping the
    /// service-specific settings from the environment.
    pub fn from_env_with_engine_file(path: impl Into<std::path::PathBuf>) -> archive_core::Result<Self> {
        let mut config = Self::from_env()?;
        config.engine = archive_config::load_config_from_file(path).map_err(|e| archive_core::ArchiveError::configuration(e.to_string()))?;
        Ok(config)
    }

    fn validate(&self) -> archive_core::Result<()> {
        if self.server.port == 0 {
            return Err(archive_core::ArchiveError::configuration("server.port must be greater than 0"));
        }
        if let EmbeddingBackendConfig::Onnx { model_dir, .. } = &self.embedding_backend {
            if model_dir.as_os_str().is_empty() {
                return Err(archive_core::ArchiveError::configuration("onnx embedding backend requires a model directory"));
            }
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            embedding_backend: EmbeddingBackendConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(ServiceConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_port_is_a_configuration_error() {
        let mut config = ServiceConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn onnx_backend_without_model_dir_is_a_configuration_error() {
        let mut config = ServiceConfig::default();
        config.embedding_backend = EmbeddingBackendConfig::Onnx { model_dir: std::path::PathBuf::new(), max_sequence_length: 256 };
        assert!(config.validate().is_err());
    }
}
