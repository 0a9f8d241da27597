use crate::rerank::RerankCandidate;
use std::collections::HashMap;

/// A deduplicated candidate: the highest-scoring chunk or whole-article
/// representative for one article, plus the number of distinct vector
/// documents that matched (`matched_sections`, surfaced for UI transparency).
#[derive(Debug, Clone)]
pub struct DedupedCandidate {
    pub representative: RerankCandidate,
    pub matched_sections: usize,
}

/// Groups reranked candidates by `article_id`, keeping the
/// highest-scoring representative per article. Ties within a group are
/// broken the same way the final ranking breaks them (input order is
/// assumed already sorted by score descending).
pub fn dedup_to_articles(candidates: Vec<RerankCandidate>) -> Vec<DedupedCandidate> {
    let mut groups: HashMap<i64, DedupedCandidate> = HashMap::new();
    let mut order: Vec<i64> = Vec::new();

    for candidate in candidates {
        match groups.get_mut(&candidate.article_id) {
            Some(existing) => {
                existing.matched_sections += 1;
                if candidate.score > existing.representative.score {
                    existing.representative = candidate;
                }
            }
            None => {
                order.push(candidate.article_id);
                groups.insert(
                    candidate.article_id,
                    DedupedCandidate {
                        representative: candidate,
                        matched_sections: 1,
                    },
                );
            }
        }
    }

    let mut deduped: Vec<DedupedCandidate> = order.into_iter().filter_map(|id| groups.remove(&id)).collect();
    deduped.sort_by(|a, b| {
        b.representative
            .score
            .partial_cmp(&a.representative.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(doc_id: &str, article_id: i64, score: f32) -> RerankCandidate {
        let mut c = RerankCandidate::new(doc_id.to_string(), article_id, score, "t".to_string());
        c.score = score;
        c
    }

    #[test]
    fn keeps_highest_scoring_chunk_per_article() {
        let candidates = vec![
            candidate("c_1_0", 1, 0.5),
            candidate("c_1_1", 1, 0.8),
            candidate("c_1_2", 1, 0.3),
        ];
        let deduped = dedup_to_articles(candidates);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].representative.doc_id, "c_1_1");
        assert_eq!(deduped[0].matched_sections, 3);
    }

    #[test]
    fn distinct_articles_remain_distinct() {
        let candidates = vec![candidate("a_1", 1, 0.9), candidate("a_2", 2, 0.8)];
        let deduped = dedup_to_articles(candidates);
        assert_eq!(deduped.len(), 2);
    }

    #[test]
    fn output_is_sorted_by_representative_score_descending() {
        let candidates = vec![candidate("a_1", 1, 0.2), candidate("a_2", 2, 0.9)];
        let deduped = dedup_to_articles(candidates);
        assert_eq!(deduped[0].representative.article_id, 2);
    }
}
