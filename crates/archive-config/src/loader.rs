use crate::models::Config;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::PathBuf;

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("configuration parsing error: {0}")]
    ParseError(String),

    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Loads and assembles a [`Config`] with precedence: environment overrides
/// highest, then an optional TOML file, then compiled-in defaults.
pub struct ConfigResolver {
    file_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigResolver {
    /// Env-and-defaults only resolver, using the default `ARCHIVE_` prefix.
    pub fn new() -> Self {
        Self {
            file_path: None,
            env_prefix: "ARCHIVE_".to_string(),
        }
    }

    pub fn with_file(mut self, file_path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = &self.file_path {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            } else {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
        }

        figment = figment.merge(Env::prefixed(&self.env_prefix).split("__"));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        validate(&config)?;
        Ok(config)
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Cross-field invariants that no single field's type can express.
pub(crate) fn validate(config: &Config) -> Result<(), ConfigError> {
    let chunking = &config.chunking;
    if chunking.threshold_words == 0 {
        return Err(ConfigError::ValidationError(
            "chunking.threshold_words must be greater than 0".to_string(),
        ));
    }
    if chunking.chunk_size_words <= chunking.overlap_words {
        return Err(ConfigError::ValidationError(format!(
            "chunking.chunk_size_words ({}) must exceed chunking.overlap_words ({})",
            chunking.chunk_size_words, chunking.overlap_words
        )));
    }

    if config.embedding.dimension == 0 {
        return Err(ConfigError::ValidationError(
            "embedding.dimension must be greater than 0".to_string(),
        ));
    }

    if config.retrieval.retrieval_k == 0 {
        return Err(ConfigError::ValidationError(
            "retrieval.retrieval_k must be greater than 0".to_string(),
        ));
    }

    let reranking = &config.reranking;
    for (name, value) in [
        ("title_boost_max", reranking.title_boost_max),
        ("keyword_boost_max", reranking.keyword_boost_max),
        ("keyword_boost_scale", reranking.keyword_boost_scale),
        ("keyword_density_scale", reranking.keyword_density_scale),
    ] {
        if value < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "reranking.{name} must be non-negative, got {value}"
            )));
        }
    }

    let hybrid = &config.semantic_filter.hybrid;
    if hybrid.tight_cluster_std_threshold >= hybrid.wide_spread_std_threshold {
        return Err(ConfigError::ValidationError(format!(
            "semantic_filter.hybrid.tight_cluster_std_threshold ({}) must be less than wide_spread_std_threshold ({})",
            hybrid.tight_cluster_std_threshold, hybrid.wide_spread_std_threshold
        )));
    }

    Ok(())
}

/// Load configuration with the default resolver (env + defaults, no file).
pub fn load_config() -> Result<Config, ConfigError> {
    ConfigResolver::new().load()
}

/// Load configuration from a specific TOML file, with environment overrides.
pub fn load_config_from_file(file_path: impl Into<PathBuf>) -> Result<Config, ConfigError> {
    ConfigResolver::new().with_file(file_path).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_validates() {
        assert!(ConfigResolver::new().load().is_ok());
    }

    #[test]
    fn rejects_overlap_not_smaller_than_chunk_size() {
        let mut config = Config::default();
        config.chunking.overlap_words = config.chunking.chunk_size_words;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("chunk_size_words"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let resolver = ConfigResolver::new().with_file("/nonexistent/archive.toml");
        assert!(matches!(resolver.load(), Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[retrieval]\nretrieval_k = 250").unwrap();

        let config = ConfigResolver::new().with_file(file.path()).load().unwrap();
        assert_eq!(config.retrieval.retrieval_k, 250);
    }

    #[test]
    fn env_overrides_file_and_defaults() {
        std::env::set_var("ARCHIVE_TEST_RETRIEVAL__RETRIEVAL_K", "99");
        let resolver = ConfigResolver::new().with_env_prefix("ARCHIVE_TEST_");
        let config = resolver.load().unwrap();
        assert_eq!(config.retrieval.retrieval_k, 99);
        std::env::remove_var("ARCHIVE_TEST_RETRIEVAL__RETRIEVAL_K");
    }
}
