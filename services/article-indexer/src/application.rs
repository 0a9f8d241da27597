//! Dependency injection container for the `article-indexer` service: wires
//! the article store, vector index, embedding backend, search engine,
//! indexing service, and health aggregator into the set of dependencies the
//! HTTP layer needs.

use std::sync::Arc;

use archive_core::traits::HealthChecker;
use archive_core::Result;
use archive_observability::HealthAggregator;
use archive_search::SearchEngine;
use archive_vector::{EmbeddingBackend, InMemoryVectorIndex, VectorIndex};

use crate::config::{EmbeddingBackendConfig, ServiceConfig};
use crate::health::VectorIndexHealthChecker;
use crate::indexing_service::IndexingService;
use crate::infrastructure::http::AppState;
use crate::infrastructure::{LocalEmbeddingAdapter, LocalEmbeddingConfig, OnnxEmbeddingAdapter, OnnxEmbeddingConfig};
use crate::store::ArticleStore;

pub struct ServiceContainer {
    pub store: Arc<ArticleStore>,
    pub vector_index: Arc<dyn VectorIndex>,
    pub embeddings: Arc<dyn EmbeddingBackend>,
    pub search_engine: Arc<SearchEngine>,
    pub indexing_service: Arc<IndexingService>,
    pub health: Arc<HealthAggregator>,
}

impl ServiceContainer {
    pub async fn new(config: &ServiceConfig) -> Result<Self> {
        let store = Arc::new(ArticleStore::open(&config.storage.article_store_path).await?);

        let vector_index: Arc<dyn VectorIndex> = Arc::new(InMemoryVectorIndex::new());
        if config.storage.vector_index_path.exists() {
            vector_index.load(&config.storage.vector_index_path).await?;
        }

        let embeddings: Arc<dyn EmbeddingBackend> = match &config.embedding_backend {
            EmbeddingBackendConfig::Local => Arc::new(LocalEmbeddingAdapter::new(LocalEmbeddingConfig {
                dimension: config.engine.embedding.dimension,
                seed: 42,
            })?),
            EmbeddingBackendConfig::Onnx { model_dir, max_sequence_length } => Arc::new(OnnxEmbeddingAdapter::load(OnnxEmbeddingConfig {
                model_dir: model_dir.clone(),
                dimension: config.engine.embedding.dimension,
                model_identifier: config.engine.embedding.model_identifier.clone(),
                max_sequence_length: *max_sequence_length,
            })?),
        };

        let search_engine = Arc::new(SearchEngine::new(vector_index.clone(), embeddings.clone(), store.clone(), config.engine.clone()));

        let indexing_service = Arc::new(IndexingService::new(
            store.clone(),
            vector_index.clone(),
            embeddings.clone(),
            config.engine.chunking.clone(),
            config.storage.embedding_version,
        ));

        let mut health = HealthAggregator::new();
        health.register("article_store", store.clone() as Arc<dyn HealthChecker>);
        health.register("vector_index", Arc::new(VectorIndexHealthChecker::new(vector_index.clone())));

        Ok(Self {
            store,
            vector_index,
            embeddings,
            search_engine,
            indexing_service,
            health: Arc::new(health),
        })
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            search_engine: self.search_engine.clone(),
            store: self.store.clone(),
            indexing_service: self.indexing_service.clone(),
            health: self.health.clone(),
        }
    }

    /// Snapshots the vector index to disk. Intended to run on a schedule or
    /// on graceful shutdown; the article store persists itself on every
    /// write, so only the index needs an explicit save path.
    pub async fn save_vector_index(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| archive_core::ArchiveError::Io { message: e.to_string() })?;
        }
        self.vector_index.save(path).await
    }
}
