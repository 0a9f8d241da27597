/// Layered configuration for the article search engine.
///
/// A single `Config` record covers chunking, embedding, retrieval, and
/// reranking parameters. `ConfigResolver` assembles one by layering
/// compiled-in defaults, an optional TOML file, and environment variables
/// (highest precedence), then validates cross-field invariants that no
/// single field's type can express.
pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{load_config, load_config_from_file, ConfigError, ConfigResolver};
pub use models::{
    ChunkingConfig, Config, EmbeddingConfig, HybridFilterConfig, KeywordLengthNormalization,
    PhrasePresenceBoost, QueryLengthScaling, RecencyBoost, RecencyTier, RerankingConfig,
    RetrievalConfig, SemanticDiscoveryBoost, SemanticFilterConfig,
};
pub use validation::validate_config;
