use serde::{Deserialize, Serialize};

/// Chunking parameters; see `services/article-indexer`'s chunker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkingConfig {
    pub threshold_words: usize,
    pub chunk_size_words: usize,
    pub overlap_words: usize,
    pub section_markers: Vec<String>,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            threshold_words: 1000,
            chunk_size_words: 400,
            overlap_words: 50,
            section_markers: vec!["\n\n".to_string(), "\n".to_string()],
        }
    }
}

/// Embedding backend identity. Opaque beyond name/dimension; nothing in this
/// crate family branches on which model is configured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    pub model_identifier: String,
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_identifier: "bge-base-en-v1.5".to_string(),
            dimension: 768,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    pub retrieval_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { retrieval_k: 400 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KeywordLengthNormalization {
    Linear,
    Log,
}

impl Default for KeywordLengthNormalization {
    fn default() -> Self {
        KeywordLengthNormalization::Log
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhrasePresenceBoost {
    pub enabled: bool,
    pub in_title: f32,
    pub in_content: f32,
    pub all_terms_in_title: f32,
}

impl Default for PhrasePresenceBoost {
    fn default() -> Self {
        Self {
            enabled: true,
            in_title: 0.08,
            in_content: 0.06,
            all_terms_in_title: 0.04,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SemanticDiscoveryBoost {
    pub enabled: bool,
    pub min_semantic_score: f32,
    pub max_keyword_hits: usize,
    pub boost: f32,
}

impl Default for SemanticDiscoveryBoost {
    fn default() -> Self {
        Self {
            enabled: true,
            min_semantic_score: 0.70,
            max_keyword_hits: 1,
            boost: 0.025,
        }
    }
}

/// Scales every boost magnitude down as the query grows longer, so long
/// queries trust semantic similarity over keyword/title signals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryLengthScaling {
    pub short_terms: usize,
    pub medium_terms: usize,
    pub medium_multiplier: f32,
    pub long_multiplier: f32,
}

impl Default for QueryLengthScaling {
    fn default() -> Self {
        Self {
            short_terms: 3,
            medium_terms: 4,
            medium_multiplier: 0.5,
            long_multiplier: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RecencyTier {
    pub within_days: i64,
    pub boost: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecencyBoost {
    pub enabled: bool,
    pub tiers: Vec<RecencyTier>,
}

impl Default for RecencyBoost {
    fn default() -> Self {
        Self {
            enabled: true,
            tiers: vec![
                RecencyTier { within_days: 7, boost: 0.07 },
                RecencyTier { within_days: 30, boost: 0.05 },
                RecencyTier { within_days: 90, boost: 0.03 },
                RecencyTier { within_days: 365, boost: 0.02 },
                RecencyTier { within_days: 3 * 365, boost: 0.01 },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RerankingConfig {
    pub title_boost_max: f32,
    pub keyword_boost_max: f32,
    pub keyword_boost_scale: f32,
    pub keyword_density_scale: f32,
    pub keyword_rerank_top_n: usize,
    pub keyword_max_query_terms: usize,
    pub keyword_length_normalization: KeywordLengthNormalization,
    pub keyword_log_base_offset: f32,
    pub phrase_presence_boost: PhrasePresenceBoost,
    pub semantic_discovery_boost: SemanticDiscoveryBoost,
    pub query_length_scaling: QueryLengthScaling,
    pub recency_boost: RecencyBoost,
}

impl Default for RerankingConfig {
    fn default() -> Self {
        Self {
            title_boost_max: 0.08,
            keyword_boost_max: 0.06,
            keyword_boost_scale: 0.06,
            keyword_density_scale: 1.0,
            keyword_rerank_top_n: 150,
            keyword_max_query_terms: 5,
            keyword_length_normalization: KeywordLengthNormalization::Log,
            keyword_log_base_offset: 2.0,
            phrase_presence_boost: PhrasePresenceBoost::default(),
            semantic_discovery_boost: SemanticDiscoveryBoost::default(),
            query_length_scaling: QueryLengthScaling::default(),
            recency_boost: RecencyBoost::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HybridFilterConfig {
    pub min_absolute_threshold: f32,
    pub std_multiplier: f32,
    pub distribution_adaptive: bool,
    pub tight_cluster_std_threshold: f32,
    pub tight_cluster_multiplier: f32,
    pub wide_spread_std_threshold: f32,
    pub wide_spread_multiplier: f32,
}

impl Default for HybridFilterConfig {
    fn default() -> Self {
        Self {
            min_absolute_threshold: 0.35,
            std_multiplier: 2.0,
            distribution_adaptive: true,
            tight_cluster_std_threshold: 0.05,
            tight_cluster_multiplier: 1.0,
            wide_spread_std_threshold: 0.12,
            wide_spread_multiplier: 2.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SemanticFilterConfig {
    pub hybrid: HybridFilterConfig,
}

/// Root configuration record, assembled by `ConfigResolver` from compiled-in
/// defaults, an optional TOML file, and environment overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    pub chunking: ChunkingConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub reranking: RerankingConfig,
    pub semantic_filter: SemanticFilterConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chunking_is_self_consistent() {
        let c = ChunkingConfig::default();
        assert!(c.chunk_size_words > c.overlap_words);
        assert!(c.threshold_words > 0);
    }

    #[test]
    fn recency_tiers_are_ordered_ascending() {
        let tiers = RecencyBoost::default().tiers;
        for pair in tiers.windows(2) {
            assert!(pair[0].within_days < pair[1].within_days);
        }
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string(&config).expect("serialize");
        let back: Config = toml::from_str(&text).expect("deserialize");
        assert_eq!(config, back);
    }
}
