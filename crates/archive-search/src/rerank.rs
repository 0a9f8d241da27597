use crate::query::ParsedQuery;
use archive_config::{HybridFilterConfig, KeywordLengthNormalization, RerankingConfig};
use chrono::{DateTime, Utc};

/// One candidate as it flows through the reranking pipeline. `text` is the
/// fetched article/chunk content, populated by the search engine for up to
/// `keyword_rerank_top_n` candidates; signals that need body text degrade
/// gracefully (contribute nothing) when it is absent.
#[derive(Debug, Clone)]
pub struct RerankCandidate {
    pub doc_id: String,
    pub article_id: i64,
    pub base_score: f32,
    pub score: f32,
    pub title: String,
    pub text: Option<String>,
    pub word_count: Option<usize>,
    pub published_date: Option<DateTime<Utc>>,
}

impl RerankCandidate {
    pub fn new(doc_id: String, article_id: i64, base_score: f32, title: String) -> Self {
        Self {
            doc_id,
            article_id,
            base_score,
            score: base_score,
            title,
            text: None,
            word_count: None,
            published_date: None,
        }
    }
}

/// Runs the full additive reranking pipeline over `candidates`, mutating and
/// returning them re-sorted by final score descending. Candidates dropped by
/// the distribution-adaptive threshold are removed from the result.
pub fn rerank(
    mut candidates: Vec<RerankCandidate>,
    parsed: &ParsedQuery,
    config: &RerankingConfig,
    hybrid: &HybridFilterConfig,
    now: DateTime<Utc>,
) -> Vec<RerankCandidate> {
    for candidate in candidates.iter_mut() {
        candidate.score = candidate.base_score;
    }

    let query_multiplier = query_length_multiplier(parsed.semantic_terms.len(), config);

    if hybrid.distribution_adaptive {
        candidates = apply_semantic_threshold(candidates, hybrid);
    }

    apply_title_boost(&mut candidates, parsed, config.title_boost_max * query_multiplier);

    if config.phrase_presence_boost.enabled {
        apply_phrase_presence_boost(&mut candidates, parsed, config, query_multiplier);
    }

    let keyword_hits = apply_keyword_frequency_boost(&mut candidates, parsed, config, query_multiplier);

    if config.semantic_discovery_boost.enabled {
        apply_semantic_discovery_boost(&mut candidates, &keyword_hits, config, query_multiplier);
    }

    if config.recency_boost.enabled {
        apply_recency_boost(&mut candidates, config, now, query_multiplier);
    }

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.published_date.cmp(&a.published_date))
            .then_with(|| a.article_id.cmp(&b.article_id))
    });
    candidates
}

fn query_length_multiplier(term_count: usize, config: &RerankingConfig) -> f32 {
    let scaling = &config.query_length_scaling;
    if term_count <= scaling.short_terms {
        1.0
    } else if term_count == scaling.medium_terms {
        scaling.medium_multiplier
    } else {
        scaling.long_multiplier
    }
}

fn mean_and_std(values: &[f32]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f32>() / values.len() as f32;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / values.len() as f32;
    (mean, variance.sqrt())
}

fn apply_semantic_threshold(candidates: Vec<RerankCandidate>, hybrid: &HybridFilterConfig) -> Vec<RerankCandidate> {
    let base_scores: Vec<f32> = candidates.iter().map(|c| c.base_score).collect();
    let (mean, std_dev) = mean_and_std(&base_scores);

    let std_multiplier = if std_dev < hybrid.tight_cluster_std_threshold {
        hybrid.tight_cluster_multiplier
    } else if std_dev > hybrid.wide_spread_std_threshold {
        hybrid.wide_spread_multiplier
    } else {
        hybrid.std_multiplier
    };

    let threshold = (mean - std_multiplier * std_dev).max(hybrid.min_absolute_threshold);

    candidates.into_iter().filter(|c| c.base_score >= threshold).collect()
}

pub(crate) fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let haystack_lower = haystack.to_lowercase();
    let needle_lower = needle.to_lowercase();

    let is_boundary = |c: Option<char>| c.map_or(true, |c| !c.is_alphanumeric());

    let mut search_from = 0;
    while let Some(pos) = haystack_lower[search_from..].find(&needle_lower) {
        let start = search_from + pos;
        let end = start + needle_lower.len();
        let before = haystack_lower[..start].chars().last();
        let after = haystack_lower[end..].chars().next();
        if is_boundary(before) && is_boundary(after) {
            return true;
        }
        search_from = start + 1;
        if search_from >= haystack_lower.len() {
            break;
        }
    }
    false
}

fn apply_title_boost(candidates: &mut [RerankCandidate], parsed: &ParsedQuery, max_boost: f32) {
    if parsed.semantic_terms.is_empty() {
        return;
    }
    for candidate in candidates.iter_mut() {
        let matches = parsed
            .semantic_terms
            .iter()
            .filter(|term| contains_whole_word(&candidate.title, term))
            .count();
        let fraction = matches as f32 / parsed.semantic_terms.len() as f32;
        candidate.score += (fraction * max_boost).min(max_boost);
    }
}

fn phrase_candidates(parsed: &ParsedQuery) -> Vec<String> {
    let mut phrases = parsed.exact_phrases.clone();
    if parsed.semantic_terms.len() >= 2 {
        phrases.push(parsed.semantic_terms.join(" "));
    }
    phrases
}

fn apply_phrase_presence_boost(candidates: &mut [RerankCandidate], parsed: &ParsedQuery, config: &RerankingConfig, multiplier: f32) {
    let phrases = phrase_candidates(parsed);
    if phrases.is_empty() {
        return;
    }
    let boost_config = &config.phrase_presence_boost;

    for candidate in candidates.iter_mut() {
        let in_title = phrases.iter().any(|p| contains_whole_word(&candidate.title, p));
        let in_content = candidate
            .text
            .as_ref()
            .map(|text| phrases.iter().any(|p| contains_whole_word(text, p)))
            .unwrap_or(false);
        let all_terms_in_title = !parsed.semantic_terms.is_empty()
            && parsed
                .semantic_terms
                .iter()
                .all(|term| contains_whole_word(&candidate.title, term));

        let increment = if in_title {
            boost_config.in_title
        } else if in_content {
            boost_config.in_content
        } else if all_terms_in_title {
            boost_config.all_terms_in_title
        } else {
            0.0
        };

        candidate.score += increment * multiplier;
    }
}

/// Returns, per candidate `doc_id`, the count of distinct semantic terms
/// observed at least once in its text — used by the discovery boost.
fn apply_keyword_frequency_boost(
    candidates: &mut [RerankCandidate],
    parsed: &ParsedQuery,
    config: &RerankingConfig,
    multiplier: f32,
) -> std::collections::HashMap<String, usize> {
    let mut hits = std::collections::HashMap::new();
    let terms: Vec<&String> = parsed.semantic_terms.iter().take(config.keyword_max_query_terms).collect();
    if terms.is_empty() {
        return hits;
    }

    for candidate in candidates.iter_mut().take(config.keyword_rerank_top_n) {
        let Some(text) = candidate.text.as_ref() else {
            continue;
        };
        let word_count = candidate.word_count.unwrap_or_else(|| text.split_whitespace().count());

        let mut total_hits = 0usize;
        let mut distinct_hits = 0usize;
        for term in &terms {
            let count = count_whole_word_occurrences(text, term);
            if count > 0 {
                distinct_hits += 1;
            }
            total_hits += count;
        }
        hits.insert(candidate.doc_id.clone(), distinct_hits);

        if total_hits == 0 {
            continue;
        }

        let normalizer = match config.keyword_length_normalization {
            KeywordLengthNormalization::Log => ((word_count as f32) + config.keyword_log_base_offset).ln(),
            KeywordLengthNormalization::Linear => word_count.max(1) as f32,
        };
        let density = (total_hits as f32 / normalizer.max(f32::EPSILON)) * config.keyword_density_scale;
        let increment = (config.keyword_boost_scale * (1.0 + density).ln()).min(config.keyword_boost_max);
        candidate.score += increment * multiplier;
    }

    hits
}

fn count_whole_word_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    let haystack_lower = haystack.to_lowercase();
    let needle_lower = needle.to_lowercase();
    let is_boundary = |c: Option<char>| c.map_or(true, |c| !c.is_alphanumeric());

    let mut count = 0;
    let mut search_from = 0;
    while let Some(pos) = haystack_lower[search_from..].find(&needle_lower) {
        let start = search_from + pos;
        let end = start + needle_lower.len();
        let before = haystack_lower[..start].chars().last();
        let after = haystack_lower[end..].chars().next();
        if is_boundary(before) && is_boundary(after) {
            count += 1;
        }
        search_from = start + 1;
        if search_from >= haystack_lower.len() {
            break;
        }
    }
    count
}

fn apply_semantic_discovery_boost(
    candidates: &mut [RerankCandidate],
    keyword_hits: &std::collections::HashMap<String, usize>,
    config: &RerankingConfig,
    multiplier: f32,
) {
    let discovery = &config.semantic_discovery_boost;
    for candidate in candidates.iter_mut() {
        let hits = keyword_hits.get(&candidate.doc_id).copied().unwrap_or(0);
        if candidate.base_score >= discovery.min_semantic_score && hits <= discovery.max_keyword_hits {
            candidate.score += discovery.boost * multiplier;
        }
    }
}

fn apply_recency_boost(candidates: &mut [RerankCandidate], config: &RerankingConfig, now: DateTime<Utc>, multiplier: f32) {
    let mut tiers = config.recency_boost.tiers.clone();
    tiers.sort_by_key(|t| t.within_days);

    for candidate in candidates.iter_mut() {
        let Some(published) = candidate.published_date else {
            continue;
        };
        let age_days = (now - published).num_days();
        if let Some(tier) = tiers.iter().find(|t| age_days <= t.within_days) {
            candidate.score += tier.boost * multiplier;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archive_config::Config;

    fn candidate(doc_id: &str, article_id: i64, base_score: f32, title: &str) -> RerankCandidate {
        RerankCandidate::new(doc_id.to_string(), article_id, base_score, title.to_string())
    }

    fn parsed(terms: &[&str]) -> ParsedQuery {
        ParsedQuery {
            semantic_terms: terms.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn title_boost_scales_with_matched_fraction() {
        let config = Config::default();
        let mut candidates = vec![candidate("a_1", 1, 0.5, "Permanent Revolution and the State")];
        let query = parsed(&["permanent", "revolution"]);
        apply_title_boost(&mut candidates, &query, config.reranking.title_boost_max);
        assert!(candidates[0].score > 0.5);
        assert!(candidates[0].score <= 0.5 + config.reranking.title_boost_max);
    }

    #[test]
    fn whole_word_matching_does_not_match_substrings() {
        assert!(!contains_whole_word("international", "nation"));
        assert!(contains_whole_word("the nation state", "nation"));
    }

    #[test]
    fn recency_boost_applies_only_the_closest_tier() {
        let config = Config::default();
        let now = Utc::now();
        let mut candidates = vec![candidate("a_1", 1, 0.5, "t")];
        candidates[0].published_date = Some(now - chrono::Duration::days(3));
        apply_recency_boost(&mut candidates, &config.reranking, now, 1.0);
        let expected = config.reranking.recency_boost.tiers[0].boost;
        assert!((candidates[0].score - (0.5 + expected)).abs() < 1e-6);
    }

    #[test]
    fn query_length_multiplier_shrinks_for_longer_queries() {
        let config = Config::default().reranking;
        assert_eq!(query_length_multiplier(1, &config), 1.0);
        assert_eq!(query_length_multiplier(3, &config), 1.0);
        assert_eq!(query_length_multiplier(4, &config), config.query_length_scaling.medium_multiplier);
        assert_eq!(query_length_multiplier(6, &config), config.query_length_scaling.long_multiplier);
    }

    #[test]
    fn distribution_threshold_drops_low_outliers_in_a_tight_cluster() {
        let hybrid = HybridFilterConfig::default();
        let candidates = vec![
            candidate("a_1", 1, 0.91, "t"),
            candidate("a_2", 2, 0.90, "t"),
            candidate("a_3", 3, 0.895, "t"),
            candidate("a_4", 4, 0.905, "t"),
            candidate("a_5", 5, 0.30, "t"),
        ];
        let survivors = apply_semantic_threshold(candidates, &hybrid);
        assert_eq!(survivors.len(), 4);
        assert!(survivors.iter().all(|c| c.base_score >= 0.8));
    }

    #[test]
    fn keyword_boost_rewards_higher_term_density() {
        let config = Config::default().reranking;
        let query = parsed(&["revolution"]);
        let mut candidates = vec![
            candidate("a_1", 1, 0.5, "t"),
            candidate("a_2", 2, 0.5, "t"),
        ];
        candidates[0].text = Some("revolution revolution revolution permanent struggle".to_string());
        candidates[0].word_count = Some(5);
        candidates[1].text = Some("a quiet afternoon with no relevant terms at all here".to_string());
        candidates[1].word_count = Some(10);

        apply_keyword_frequency_boost(&mut candidates, &query, &config, 1.0);
        assert!(candidates[0].score > candidates[1].score);
    }

    #[test]
    fn final_ordering_breaks_ties_by_recency_then_article_id() {
        let now = Utc::now();
        let mut a = candidate("a_1", 5, 0.5, "t");
        a.score = 0.5;
        a.published_date = Some(now - chrono::Duration::days(10));
        let mut b = candidate("a_2", 2, 0.5, "t");
        b.score = 0.5;
        b.published_date = Some(now - chrono::Duration::days(1));

        let config = Config::default();
        let ranked = rerank(vec![a, b], &ParsedQuery::default(), &config.reranking, &config.semantic_filter.hybrid, now);
        assert_eq!(ranked[0].article_id, 2);
    }
}
