//! Orchestrates turning article store rows into vector index documents.
//!
//! Two entry points: [`IndexingService::build`] walks every article and is
//! meant to run against a freshly created vector index (the trait this
//! crate depends on has no `clear`, so a full rebuild is the caller standing
//! up a new index and swapping it in once this returns). [`IndexingService::update`]
//! is the steady-state path: it only touches articles the store reports as
//! stale, and is safe to run repeatedly against a live index.

use crate::chunking::{chunk_article, title_weighted_text, word_count};
use archive_config::ChunkingConfig;
use archive_core::{Article, DocId, Result};
use archive_vector::{EmbeddingBackend, VectorDocMeta, VectorIndex};
use std::sync::Arc;
use tracing::{info, warn};

use crate::store::ArticleStore;

/// Outcome of one `build` or `update` pass. Failures are per-article and
/// non-fatal: a bad article is logged and skipped, leaving `indexed = false`
/// for the next pass to retry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub articles_processed: usize,
    pub articles_failed: usize,
    pub chunks_written: usize,
}

pub struct IndexingService {
    store: Arc<ArticleStore>,
    index: Arc<dyn VectorIndex>,
    embeddings: Arc<dyn EmbeddingBackend>,
    chunking: ChunkingConfig,
    embedding_version: u32,
}

impl IndexingService {
    pub fn new(store: Arc<ArticleStore>, index: Arc<dyn VectorIndex>, embeddings: Arc<dyn EmbeddingBackend>, chunking: ChunkingConfig, embedding_version: u32) -> Self {
        Self {
            store,
            index,
            embeddings,
            chunking,
            embedding_version,
        }
    }

    /// Indexes every article in the store in ascending id order. Intended
    /// for a fresh vector index; running it against a populated one leaves
    /// stale documents behind for articles that no longer exist.
    pub async fn build(&self) -> Result<IndexReport> {
        let articles = self.store.all_articles().await?;
        info!(article_count = articles.len(), "starting full index build");
        self.index_articles(articles).await
    }

    /// Indexes only articles the store reports as stale: `indexed == false`
    /// or `embedding_version` behind the one this service was configured
    /// with. Existing vector documents for a re-indexed article are deleted
    /// before the new ones are written.
    pub async fn update(&self) -> Result<IndexReport> {
        let articles = self.store.articles_needing_indexing(self.embedding_version).await?;
        info!(article_count = articles.len(), "starting incremental index update");
        self.index_articles(articles).await
    }

    async fn index_articles(&self, articles: Vec<Article>) -> Result<IndexReport> {
        let mut report = IndexReport::default();

        for article in articles {
            match self.index_one(&article).await {
                Ok(chunks_written) => {
                    report.articles_processed += 1;
                    report.chunks_written += chunks_written;
                }
                Err(err) => {
                    warn!(article_id = article.id, error = %err, "skipping article after indexing failure");
                    report.articles_failed += 1;
                }
            }
        }

        Ok(report)
    }

    async fn index_one(&self, article: &Article) -> Result<usize> {
        self.delete_existing_documents(article.id).await?;

        let chunks = chunk_article(article.id, article.body(), &self.chunking);

        if chunks.is_empty() {
            let text = title_weighted_text(&article.title, 0, article.body());
            let embedding = self.embed_one(&text).await?;
            let meta = VectorDocMeta {
                article_id: article.id,
                title: article.title.clone(),
                source: article.source.clone(),
                author: article.author.clone(),
                published_date: article.published_date,
                is_chunk: false,
                chunk_index: 0,
            };
            self.index.upsert(DocId::article(article.id).to_key(), meta, embedding).await?;
        } else {
            let texts: Vec<String> = chunks.iter().map(|c| title_weighted_text(&article.title, c.chunk_index, &c.content)).collect();
            let embeddings = self.embeddings.embed(&texts).await?;

            for (chunk, embedding) in chunks.iter().zip(embeddings.into_iter()) {
                let meta = VectorDocMeta {
                    article_id: article.id,
                    title: article.title.clone(),
                    source: article.source.clone(),
                    author: article.author.clone(),
                    published_date: article.published_date,
                    is_chunk: true,
                    chunk_index: chunk.chunk_index,
                };
                self.index.upsert(DocId::chunk(article.id, chunk.chunk_index).to_key(), meta, embedding).await?;
            }
        }

        self.store.replace_chunks_and_mark_indexed(article.id, &chunks, self.embedding_version).await?;
        Ok(chunks.len())
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embeddings.embed(&[text.to_string()]).await?;
        Ok(embeddings.pop().unwrap_or_default())
    }

    /// Deletes whatever vector documents currently represent `article_id`,
    /// using the chunk rows still in the store (pre-replacement) to know
    /// whether it was previously a whole-article document or a chunk set,
    /// and how many chunks to delete.
    async fn delete_existing_documents(&self, article_id: i64) -> Result<()> {
        let existing_chunks = self.store.get_chunks(article_id, &Default::default()).await?;

        if existing_chunks.is_empty() {
            self.index.delete(&DocId::article(article_id).to_key()).await?;
        } else {
            for chunk in &existing_chunks {
                self.index.delete(&DocId::chunk(article_id, chunk.chunk_index).to_key()).await?;
            }
        }

        Ok(())
    }
}

/// Total word count across an article's body, exposed for callers (e.g. the
/// HTTP ingestion handler) that want to report it without duplicating the
/// chunker's tokenization rule.
pub fn article_word_count(body: &str) -> usize {
    word_count(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewArticle;
    use archive_vector::InMemoryVectorIndex;
    use async_trait::async_trait;

    struct FixedEmbeddingBackend {
        dimension: usize,
    }

    #[async_trait]
    impl EmbeddingBackend for FixedEmbeddingBackend {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| vec![t.len() as f32, 1.0]).collect())
        }

        fn dimension(&self) -> usize {
            self.dimension
        }

        fn model_identifier(&self) -> &str {
            "fixed-test-backend"
        }
    }

    fn chunking_config() -> ChunkingConfig {
        ChunkingConfig {
            threshold_words: 10,
            chunk_size_words: 8,
            overlap_words: 2,
            section_markers: vec!["\n\n".to_string(), "\n".to_string()],
        }
    }

    async fn service() -> (IndexingService, Arc<ArticleStore>, Arc<InMemoryVectorIndex>) {
        let store = Arc::new(ArticleStore::open_in_memory().await.unwrap());
        let index = Arc::new(InMemoryVectorIndex::new());
        let embeddings = Arc::new(FixedEmbeddingBackend { dimension: 2 });
        let service = IndexingService::new(store.clone(), index.clone(), embeddings, chunking_config(), 1);
        (service, store, index)
    }

    fn short_article(url: &str, stable_id: &str) -> NewArticle {
        NewArticle {
            url: url.to_string(),
            stable_id: stable_id.to_string(),
            title: "Short".to_string(),
            content: "just a few words here".to_string(),
            summary: None,
            source: "feed".to_string(),
            author: None,
            published_date: None,
            terms: vec![],
            tags: vec![],
        }
    }

    fn long_article(url: &str, stable_id: &str) -> NewArticle {
        let body = (0..40).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
        NewArticle {
            url: url.to_string(),
            stable_id: stable_id.to_string(),
            title: "Long".to_string(),
            content: body,
            summary: None,
            source: "feed".to_string(),
            author: None,
            published_date: None,
            terms: vec![],
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn build_indexes_a_short_article_as_one_whole_document() {
        let (service, store, index) = service().await;
        store.upsert_articles(vec![short_article("http://a", "a1")]).await.unwrap();

        let report = service.build().await.unwrap();
        assert_eq!(report.articles_processed, 1);
        assert_eq!(report.chunks_written, 0);
        assert_eq!(index.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn build_chunks_a_long_article_into_multiple_documents() {
        let (service, store, index) = service().await;
        store.upsert_articles(vec![long_article("http://a", "a1")]).await.unwrap();

        let report = service.build().await.unwrap();
        assert!(report.chunks_written >= 2);
        assert_eq!(index.count().await.unwrap(), report.chunks_written);
    }

    #[tokio::test]
    async fn build_marks_articles_indexed() {
        let (service, store, _index) = service().await;
        store.upsert_articles(vec![short_article("http://a", "a1")]).await.unwrap();
        service.build().await.unwrap();

        let articles = store.get_articles(&[1]).await.unwrap();
        assert!(articles[&1].indexed);
        assert_eq!(articles[&1].embedding_version, 1);
    }

    #[tokio::test]
    async fn update_skips_already_indexed_articles() {
        let (service, store, _index) = service().await;
        store.upsert_articles(vec![short_article("http://a", "a1")]).await.unwrap();
        service.build().await.unwrap();

        let report = service.update().await.unwrap();
        assert_eq!(report.articles_processed, 0);
    }

    #[tokio::test]
    async fn update_re_chunks_an_article_whose_content_changed_shape() {
        let (service, store, index) = service().await;
        store.upsert_articles(vec![short_article("http://a", "a1")]).await.unwrap();
        service.build().await.unwrap();
        assert_eq!(index.count().await.unwrap(), 1);

        // Simulate the article growing past the chunk threshold and being
        // queued for re-indexing under a newer embedding version.
        let chunks = chunk_article(1, &(0..40).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" "), &chunking_config());
        store.replace_chunks_and_mark_indexed(1, &chunks, 0).await.unwrap();

        let report = service.update().await.unwrap();
        assert_eq!(report.articles_processed, 1);
        assert_eq!(index.count().await.unwrap(), report.chunks_written);
    }

    #[tokio::test]
    async fn failures_on_one_article_do_not_abort_the_batch() {
        let (service, store, _index) = service().await;
        store
            .upsert_articles(vec![short_article("http://a", "a1"), short_article("http://b", "a2")])
            .await
            .unwrap();

        let report = service.build().await.unwrap();
        assert_eq!(report.articles_processed, 2);
        assert_eq!(report.articles_failed, 0);
    }
}
