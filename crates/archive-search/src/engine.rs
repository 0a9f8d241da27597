use crate::dedup::dedup_to_articles;
use crate::filter::{apply_filters, FilterSpec};
use crate::models::{SearchResponse, SearchResult};
use crate::query::parse_query;
use crate::rerank::{rerank, RerankCandidate};
use crate::traits::ArticleLookup;
use archive_config::Config;
use archive_core::{ArchiveError, Result};
use archive_vector::{EmbeddingBackend, VectorIndex};
use std::sync::Arc;
use std::time::Instant;

/// Drives the end-to-end query pipeline: parse, embed, retrieve, filter,
/// rerank, deduplicate, apply phrase filters, paginate, enrich.
pub struct SearchEngine {
    index: Arc<dyn VectorIndex>,
    embeddings: Arc<dyn EmbeddingBackend>,
    store: Arc<dyn ArticleLookup>,
    config: Config,
}

impl SearchEngine {
    pub fn new(
        index: Arc<dyn VectorIndex>,
        embeddings: Arc<dyn EmbeddingBackend>,
        store: Arc<dyn ArticleLookup>,
        config: Config,
    ) -> Self {
        Self {
            index,
            embeddings,
            store,
            config,
        }
    }

    pub async fn search(
        &self,
        query_string: &str,
        filter: FilterSpec,
        limit: usize,
        offset: usize,
    ) -> Result<SearchResponse> {
        let started = Instant::now();

        let parsed = parse_query(query_string)?;
        let embedding_input = parsed.embedding_input(query_string);

        let vectors = self
            .embeddings
            .embed(std::slice::from_ref(&embedding_input))
            .await?;
        let query_vector = vectors
            .into_iter()
            .next()
            .ok_or_else(|| ArchiveError::internal("embedding backend returned no vector"))?;

        let hits = self
            .index
            .search(&query_vector, self.config.retrieval.retrieval_k)
            .await
            .map_err(|_| ArchiveError::index_unavailable("vector index search failed"))?;

        let now = chrono::Utc::now();
        let filtered_hits = apply_filters(hits, &filter, now, |hit| &hit.metadata);

        let mut candidates: Vec<RerankCandidate> = filtered_hits
            .into_iter()
            .map(|hit| {
                let mut candidate = RerankCandidate::new(
                    hit.doc_id,
                    hit.metadata.article_id,
                    hit.score,
                    hit.metadata.title,
                );
                candidate.published_date = hit.metadata.published_date;
                candidate
            })
            .collect();

        self.populate_text_for_keyword_signals(&mut candidates).await?;

        let reranked = rerank(
            candidates,
            &parsed,
            &self.config.reranking,
            &self.config.semantic_filter.hybrid,
            now,
        );

        let deduped = dedup_to_articles(reranked);

        let phrase_filtered = self.apply_exact_and_title_phrase_filters(deduped, &parsed, &filter).await?;

        let total = phrase_filtered.len();
        let page: Vec<_> = phrase_filtered.into_iter().skip(offset).take(limit).collect();

        let results = self.enrich(page, &parsed).await?;

        Ok(SearchResponse {
            results,
            total,
            query_time_ms: started.elapsed().as_millis() as u64,
            parsed_query: parsed,
        })
    }

    /// Fetches content for up to `keyword_rerank_top_n` candidates (by
    /// current score order) so the keyword-frequency and content-phrase
    /// signals have text to work with.
    async fn populate_text_for_keyword_signals(&self, candidates: &mut [RerankCandidate]) -> Result<()> {
        let top_n = self.config.reranking.keyword_rerank_top_n.min(candidates.len());
        if top_n == 0 {
            return Ok(());
        }

        let article_ids: Vec<i64> = candidates[..top_n].iter().map(|c| c.article_id).collect();
        let articles = self
            .store
            .get_articles(&article_ids)
            .await
            .map_err(|_| ArchiveError::store_unavailable("article store lookup failed"))?;

        for candidate in candidates[..top_n].iter_mut() {
            if let Some(article) = articles.get(&candidate.article_id) {
                candidate.word_count = Some(article.word_count);
                candidate.text = Some(article.content.clone());
            }
        }
        Ok(())
    }

    async fn apply_exact_and_title_phrase_filters(
        &self,
        deduped: Vec<crate::dedup::DedupedCandidate>,
        parsed: &crate::query::ParsedQuery,
        filter: &FilterSpec,
    ) -> Result<Vec<crate::dedup::DedupedCandidate>> {
        if parsed.exact_phrases.is_empty() && parsed.title_phrases.is_empty() && parsed.author_filter.is_none() {
            return Ok(deduped);
        }

        let article_ids: Vec<i64> = deduped.iter().map(|d| d.representative.article_id).collect();
        let articles = self
            .store
            .get_articles(&article_ids)
            .await
            .map_err(|_| ArchiveError::store_unavailable("article store lookup failed"))?;

        let mut survivors = Vec::new();
        for candidate in deduped {
            let Some(article) = articles.get(&candidate.representative.article_id) else {
                continue;
            };

            if let Some(author) = &filter.author {
                if article.author.as_deref() != Some(author.as_str()) {
                    continue;
                }
            }

            if let Some(author) = &parsed.author_filter {
                if article.author.as_deref() != Some(author.as_str()) {
                    continue;
                }
            }

            if !parsed
                .title_phrases
                .iter()
                .all(|phrase| crate::rerank::contains_whole_word(&article.title, phrase))
            {
                continue;
            }

            if !parsed
                .exact_phrases
                .iter()
                .all(|phrase| crate::rerank::contains_whole_word(&article.content, phrase))
            {
                continue;
            }

            survivors.push(candidate);
        }

        Ok(survivors)
    }

    async fn enrich(
        &self,
        page: Vec<crate::dedup::DedupedCandidate>,
        parsed: &crate::query::ParsedQuery,
    ) -> Result<Vec<SearchResult>> {
        if page.is_empty() {
            return Ok(Vec::new());
        }

        let article_ids: Vec<i64> = page.iter().map(|d| d.representative.article_id).collect();
        let articles = self
            .store
            .get_articles(&article_ids)
            .await
            .map_err(|_| ArchiveError::store_unavailable("article store lookup failed"))?;

        let mut results = Vec::with_capacity(page.len());
        for candidate in page {
            let Some(article) = articles.get(&candidate.representative.article_id) else {
                continue;
            };

            let matched_phrase = parsed
                .exact_phrases
                .iter()
                .chain(parsed.title_phrases.iter())
                .find(|phrase| crate::rerank::contains_whole_word(&article.content, phrase))
                .cloned();

            let excerpt = excerpt_around_match(&article.content, matched_phrase.as_deref());

            results.push(SearchResult {
                article_id: article.id,
                title: article.title.clone(),
                url: article.url.clone(),
                source: article.source.clone(),
                author: article.author.clone(),
                published_date: article.published_date,
                excerpt,
                matched_phrase,
                matched_sections: candidate.matched_sections,
                score: candidate.representative.score,
                tags: article.tags.clone(),
            });
        }
        Ok(results)
    }
}

const EXCERPT_LEN: usize = 200;

fn excerpt_around_match(content: &str, matched_phrase: Option<&str>) -> String {
    let target = matched_phrase
        .and_then(|phrase| content.to_lowercase().find(&phrase.to_lowercase()))
        .unwrap_or(0);

    let start = target.saturating_sub(EXCERPT_LEN / 4);
    let end = (start + EXCERPT_LEN).min(content.len());
    let start = start.min(content.len());

    content
        .char_indices()
        .filter(|(i, _)| *i >= start && *i < end)
        .map(|(_, c)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_falls_back_to_article_start_without_a_match() {
        let content = "Revolutionary theory develops through practice and struggle over decades.";
        let excerpt = excerpt_around_match(content, None);
        assert!(content.starts_with(&excerpt[..excerpt.len().min(10)]));
    }
}
