//! Relational storage for articles and their chunks: a fixed SQLite schema
//! created on first open, with no migration machinery. Writes take the
//! connection-wide lock for the duration of a transaction so a reader never
//! observes a chunk set that doesn't match the `indexed`/`embedding_version`
//! stamp on its parent article.

use archive_core::{Article, ArchiveError, AuthorStat, Chunk, ComponentHealth, HealthStatus, Result, SourceStat, StoreStats};
use archive_core::traits::HealthChecker;
use archive_search::{ArticleLookup, DateRange, FilterSpec};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rusqlite::{params, Connection};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::sync::Mutex;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS articles (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    url                TEXT NOT NULL UNIQUE,
    stable_id          TEXT NOT NULL UNIQUE,
    title              TEXT NOT NULL,
    content            TEXT NOT NULL,
    summary            TEXT,
    source             TEXT NOT NULL,
    author             TEXT,
    published_date     TEXT,
    ingested_at        TEXT NOT NULL,
    word_count         INTEGER NOT NULL,
    is_chunked         INTEGER NOT NULL DEFAULT 0,
    indexed            INTEGER NOT NULL DEFAULT 0,
    embedding_version  INTEGER NOT NULL DEFAULT 0,
    terms              TEXT NOT NULL DEFAULT '[]',
    tags               TEXT NOT NULL DEFAULT '[]'
);

CREATE INDEX IF NOT EXISTS idx_articles_source ON articles(source);
CREATE INDEX IF NOT EXISTS idx_articles_author ON articles(author);
CREATE INDEX IF NOT EXISTS idx_articles_indexed ON articles(indexed);

CREATE TABLE IF NOT EXISTS chunks (
    article_id  INTEGER NOT NULL REFERENCES articles(id),
    chunk_index INTEGER NOT NULL,
    content     TEXT NOT NULL,
    word_count  INTEGER NOT NULL,
    start_char  INTEGER NOT NULL,
    PRIMARY KEY (article_id, chunk_index)
);
"#;

/// An article as handed to the store by the ingestion collaborator. `id`,
/// `ingested_at`, `word_count`, and the `indexed`/`is_chunked`/
/// `embedding_version` flags are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub url: String,
    pub stable_id: String,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub source: String,
    pub author: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub terms: Vec<String>,
    pub tags: Vec<String>,
}

fn db_error(context: &str, err: rusqlite::Error) -> ArchiveError {
    ArchiveError::store_unavailable(format!("{context}: {err}"))
}

fn to_json(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

fn from_json(text: &str) -> Vec<String> {
    serde_json::from_str(text).unwrap_or_default()
}

fn row_to_article(row: &rusqlite::Row<'_>) -> rusqlite::Result<Article> {
    let published_date: Option<String> = row.get("published_date")?;
    let terms: String = row.get("terms")?;
    let tags: String = row.get("tags")?;
    let ingested_at: String = row.get("ingested_at")?;

    Ok(Article {
        id: row.get("id")?,
        url: row.get("url")?,
        stable_id: row.get("stable_id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        summary: row.get("summary")?,
        source: row.get("source")?,
        author: row.get("author")?,
        published_date: published_date.map(|d| parse_timestamp(&d)),
        ingested_at: parse_timestamp(&ingested_at),
        word_count: row.get::<_, i64>("word_count")? as usize,
        is_chunked: row.get("is_chunked")?,
        indexed: row.get("indexed")?,
        embedding_version: row.get::<_, i64>("embedding_version")? as u32,
        terms: from_json(&terms),
        tags: from_json(&tags),
    })
}

fn parse_timestamp(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Calendar-boundary span for a `DateRange`, mirroring the reranker's own
/// calendar-month arithmetic so pushdown filtering and in-memory filtering
/// agree on what "past 3 months" means.
fn date_range_bounds(range: &DateRange, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    fn year_month_start(year: i32, month: u32) -> DateTime<Utc> {
        let naive = NaiveDate::from_ymd_opt(year, month, 1).expect("valid calendar month");
        DateTime::from_naive_utc_and_offset(naive.and_hms_opt(0, 0, 0).unwrap(), Utc)
    }

    fn months_ago(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
        let mut year = now.year();
        let mut month = now.month();
        for _ in 0..months {
            if month == 1 {
                month = 12;
                year -= 1;
            } else {
                month -= 1;
            }
        }
        year_month_start(year, month)
    }

    match range {
        DateRange::PastWeek => (now - Duration::days(7), now),
        DateRange::PastMonth => (now - Duration::days(30), now),
        DateRange::Past3Months => (months_ago(now, 3), now),
        DateRange::PastYear => (now - Duration::days(365), now),
        DateRange::Decade1990s => (year_month_start(1990, 1), year_month_start(2000, 1)),
        DateRange::Decade2000s => (year_month_start(2000, 1), year_month_start(2010, 1)),
        DateRange::Decade2010s => (year_month_start(2010, 1), year_month_start(2020, 1)),
        DateRange::Decade2020s => (year_month_start(2020, 1), year_month_start(2030, 1)),
        DateRange::Custom { start, end } => (
            DateTime::from_naive_utc_and_offset(start.and_hms_opt(0, 0, 0).unwrap(), Utc),
            DateTime::from_naive_utc_and_offset(end.and_hms_opt(23, 59, 59).unwrap(), Utc),
        ),
    }
}

/// Embedded SQLite-backed store for articles and chunks. Reads satisfy
/// `ArticleLookup`; the inherent methods are the indexing service's half of
/// the contract (upsert, chunk replacement, flag updates).
pub struct ArticleStore {
    connection: Mutex<Connection>,
}

impl ArticleStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ArchiveError::store_unavailable(format!("creating store directory: {e}")))?;
            }
        }
        let connection = Connection::open(path.as_ref()).map_err(|e| db_error("opening article store", e))?;
        connection.execute_batch(SCHEMA).map_err(|e| db_error("creating schema", e))?;

        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// An in-memory store used by tests and by anything that doesn't need
    /// the database to outlive the process.
    pub async fn open_in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(|e| db_error("opening in-memory article store", e))?;
        connection.execute_batch(SCHEMA).map_err(|e| db_error("creating schema", e))?;

        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// Inserts every article in `batch` whose URL and stable ID are both
    /// unrepresented in the store. Returns the number actually inserted;
    /// duplicates are silently dropped, never overwritten.
    pub async fn upsert_articles(&self, batch: Vec<NewArticle>) -> Result<usize> {
        let connection = self.connection.lock().await;
        let mut inserted = 0;

        for article in batch {
            let ingested_at = Utc::now();
            let word_count = crate::chunking::word_count(&article.content);

            let result = connection.execute(
                "INSERT OR IGNORE INTO articles
                    (url, stable_id, title, content, summary, source, author, published_date,
                     ingested_at, word_count, is_chunked, indexed, embedding_version, terms, tags)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0, 0, 0, ?11, ?12)",
                params![
                    article.url,
                    article.stable_id,
                    article.title,
                    article.content,
                    article.summary,
                    article.source,
                    article.author,
                    article.published_date.map(|d| d.to_rfc3339()),
                    ingested_at.to_rfc3339(),
                    word_count as i64,
                    to_json(&article.terms),
                    to_json(&article.tags),
                ],
            );

            match result {
                Ok(rows) if rows > 0 => inserted += 1,
                Ok(_) => {} // duplicate url/stable_id, silently dropped
                Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == rusqlite::ErrorCode::ConstraintViolation => {}
                Err(e) => return Err(db_error("inserting article", e)),
            }
        }

        Ok(inserted)
    }

    /// Every article with `indexed == false` or `embedding_version <
    /// current_version`, in ascending id order. Used by the incremental
    /// indexing pass to find its work set.
    pub async fn articles_needing_indexing(&self, current_version: u32) -> Result<Vec<Article>> {
        let connection = self.connection.lock().await;
        let mut stmt = connection
            .prepare("SELECT * FROM articles WHERE indexed = 0 OR embedding_version < ?1 ORDER BY id ASC")
            .map_err(|e| db_error("preparing pending-articles query", e))?;
        let rows = stmt
            .query_map(params![current_version], |row| row_to_article(row))
            .map_err(|e| db_error("querying pending articles", e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(|e| db_error("reading pending articles", e))
    }

    /// Every article in ascending id order. Used by a full rebuild.
    pub async fn all_articles(&self) -> Result<Vec<Article>> {
        let connection = self.connection.lock().await;
        let mut stmt = connection.prepare("SELECT * FROM articles ORDER BY id ASC").map_err(|e| db_error("preparing article scan", e))?;
        let rows = stmt.query_map([], |row| row_to_article(row)).map_err(|e| db_error("scanning articles", e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(|e| db_error("reading articles", e))
    }

    /// Replaces the chunk set for `article_id` and stamps `is_chunked`,
    /// `indexed`, and `embedding_version` in one transaction, so a
    /// concurrent reader never sees a half-updated article.
    pub async fn replace_chunks_and_mark_indexed(&self, article_id: i64, chunks: &[Chunk], embedding_version: u32) -> Result<()> {
        let mut connection = self.connection.lock().await;
        let tx = connection.transaction().map_err(|e| db_error("starting chunk-replace transaction", e))?;

        tx.execute("DELETE FROM chunks WHERE article_id = ?1", params![article_id])
            .map_err(|e| db_error("deleting old chunks", e))?;

        for chunk in chunks {
            tx.execute(
                "INSERT INTO chunks (article_id, chunk_index, content, word_count, start_char) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![chunk.article_id, chunk.chunk_index as i64, chunk.content, chunk.word_count as i64, chunk.start_char as i64],
            )
            .map_err(|e| db_error("inserting chunk", e))?;
        }

        tx.execute(
            "UPDATE articles SET is_chunked = ?1, indexed = 1, embedding_version = ?2 WHERE id = ?3",
            params![!chunks.is_empty(), embedding_version as i64, article_id],
        )
        .map_err(|e| db_error("marking article indexed", e))?;

        tx.commit().map_err(|e| db_error("committing chunk replace", e))
    }

    /// Chunk rows for `article_id`, restricted to `chunk_indices` when
    /// non-empty; all chunks for the article otherwise.
    pub async fn get_chunks(&self, article_id: i64, chunk_indices: &HashSet<usize>) -> Result<Vec<Chunk>> {
        let connection = self.connection.lock().await;
        let mut stmt = connection
            .prepare("SELECT article_id, chunk_index, content, word_count, start_char FROM chunks WHERE article_id = ?1 ORDER BY chunk_index ASC")
            .map_err(|e| db_error("preparing chunk query", e))?;

        let rows = stmt
            .query_map(params![article_id], |row| {
                Ok(Chunk {
                    article_id: row.get(0)?,
                    chunk_index: row.get::<_, i64>(1)? as usize,
                    content: row.get(2)?,
                    word_count: row.get::<_, i64>(3)? as usize,
                    start_char: row.get::<_, i64>(4)? as usize,
                })
            })
            .map_err(|e| db_error("querying chunks", e))?;

        let all = rows.collect::<rusqlite::Result<Vec<_>>>().map_err(|e| db_error("reading chunks", e))?;
        if chunk_indices.is_empty() {
            Ok(all)
        } else {
            Ok(all.into_iter().filter(|c| chunk_indices.contains(&c.chunk_index)).collect())
        }
    }
}

#[async_trait]
impl ArticleLookup for ArticleStore {
    async fn get_articles(&self, ids: &[i64]) -> Result<HashMap<i64, Article>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let connection = self.connection.lock().await;
        let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
        let sql = format!("SELECT * FROM articles WHERE id IN ({placeholders})");
        let mut stmt = connection.prepare(&sql).map_err(|e| db_error("preparing batch article query", e))?;

        let bind_params: Vec<&dyn rusqlite::ToSql> = ids.iter().map(|id| id as &dyn rusqlite::ToSql).collect();
        let rows = stmt
            .query_map(bind_params.as_slice(), |row| row_to_article(row))
            .map_err(|e| db_error("querying articles by id", e))?;

        let mut out = HashMap::new();
        for row in rows {
            let article = row.map_err(|e| db_error("reading article", e))?;
            out.insert(article.id, article);
        }
        Ok(out)
    }

    async fn filter_candidates(&self, ids: &[i64], filter: &FilterSpec) -> Result<Vec<i64>> {
        if ids.is_empty() || (filter.source.is_none() && filter.author.is_none() && filter.date_range.is_none()) {
            return Ok(ids.to_vec());
        }

        let articles = self.get_articles(ids).await?;
        let now = Utc::now();

        Ok(ids
            .iter()
            .copied()
            .filter(|id| match articles.get(id) {
                Some(article) => article_matches(article, filter, now),
                None => false,
            })
            .collect())
    }

    async fn list_sources(&self) -> Result<Vec<SourceStat>> {
        let connection = self.connection.lock().await;
        let mut stmt = connection
            .prepare("SELECT source, COUNT(*) FROM articles GROUP BY source ORDER BY source ASC")
            .map_err(|e| db_error("preparing source-stats query", e))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(SourceStat {
                    source: row.get(0)?,
                    article_count: row.get::<_, i64>(1)? as usize,
                })
            })
            .map_err(|e| db_error("querying source stats", e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(|e| db_error("reading source stats", e))
    }

    async fn top_authors(&self, min_count: usize) -> Result<Vec<AuthorStat>> {
        let connection = self.connection.lock().await;
        let mut stmt = connection
            .prepare(
                "SELECT author, COUNT(*), MIN(published_date), MAX(published_date)
                 FROM articles
                 WHERE author IS NOT NULL
                 GROUP BY author
                 HAVING COUNT(*) >= ?1
                 ORDER BY COUNT(*) DESC, author ASC",
            )
            .map_err(|e| db_error("preparing author-stats query", e))?;

        let rows = stmt
            .query_map(params![min_count as i64], |row| {
                let earliest: Option<String> = row.get(2)?;
                let latest: Option<String> = row.get(3)?;
                Ok(AuthorStat {
                    author: row.get(0)?,
                    article_count: row.get::<_, i64>(1)? as usize,
                    earliest: earliest.map(|d| parse_timestamp(&d)),
                    latest: latest.map(|d| parse_timestamp(&d)),
                })
            })
            .map_err(|e| db_error("querying author stats", e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(|e| db_error("reading author stats", e))
    }

    async fn stats(&self) -> Result<StoreStats> {
        let connection = self.connection.lock().await;

        let article_count: i64 = connection
            .query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))
            .map_err(|e| db_error("counting articles", e))?;
        let chunk_count: i64 = connection
            .query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))
            .map_err(|e| db_error("counting chunks", e))?;
        let indexed_count: i64 = connection
            .query_row("SELECT COUNT(*) FROM articles WHERE indexed = 1", [], |row| row.get(0))
            .map_err(|e| db_error("counting indexed articles", e))?;
        let source_count: i64 = connection
            .query_row("SELECT COUNT(DISTINCT source) FROM articles", [], |row| row.get(0))
            .map_err(|e| db_error("counting sources", e))?;

        Ok(StoreStats {
            article_count: article_count as usize,
            chunk_count: chunk_count as usize,
            indexed_count: indexed_count as usize,
            source_count: source_count as usize,
        })
    }
}

#[async_trait]
impl HealthChecker for ArticleStore {
    async fn check_health(&self) -> Result<ComponentHealth> {
        let connection = self.connection.lock().await;
        let status = match connection.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)) {
            Ok(_) => HealthStatus::Healthy,
            Err(err) => HealthStatus::Unhealthy { message: format!("article store unreachable: {err}") },
        };

        Ok(ComponentHealth {
            component: "article_store".to_string(),
            status,
            last_check: Utc::now(),
            details: None,
        })
    }
}

fn article_matches(article: &Article, filter: &FilterSpec, now: DateTime<Utc>) -> bool {
    if let Some(source) = &filter.source {
        if &article.source != source {
            return false;
        }
    }
    if let Some(author) = &filter.author {
        if article.author.as_deref() != Some(author.as_str()) {
            return false;
        }
    }
    if let Some(range) = &filter.date_range {
        match article.published_date {
            Some(published) => {
                let (start, end) = date_range_bounds(range, now);
                if published < start || published >= end {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(url: &str, stable_id: &str, source: &str, author: Option<&str>) -> NewArticle {
        NewArticle {
            url: url.to_string(),
            stable_id: stable_id.to_string(),
            title: "A Title".to_string(),
            content: "body text about things".to_string(),
            summary: None,
            source: source.to_string(),
            author: author.map(|a| a.to_string()),
            published_date: Some(Utc::now()),
            terms: vec![],
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn upserting_a_new_article_assigns_an_id() {
        let store = ArticleStore::open_in_memory().await.unwrap();
        let inserted = store.upsert_articles(vec![article("http://a", "a1", "feed", Some("Alan Woods"))]).await.unwrap();
        assert_eq!(inserted, 1);

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.article_count, 1);
    }

    #[tokio::test]
    async fn duplicate_url_is_dropped_not_overwritten() {
        let store = ArticleStore::open_in_memory().await.unwrap();
        store.upsert_articles(vec![article("http://a", "a1", "feed", None)]).await.unwrap();
        let inserted = store.upsert_articles(vec![article("http://a", "a2", "other-feed", None)]).await.unwrap();
        assert_eq!(inserted, 0);

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.article_count, 1);
    }

    #[tokio::test]
    async fn duplicate_stable_id_is_dropped_not_overwritten() {
        let store = ArticleStore::open_in_memory().await.unwrap();
        store.upsert_articles(vec![article("http://a", "a1", "feed", None)]).await.unwrap();
        let inserted = store.upsert_articles(vec![article("http://b", "a1", "feed", None)]).await.unwrap();
        assert_eq!(inserted, 0);
    }

    #[tokio::test]
    async fn replace_chunks_marks_article_indexed_and_chunked() {
        let store = ArticleStore::open_in_memory().await.unwrap();
        store.upsert_articles(vec![article("http://a", "a1", "feed", None)]).await.unwrap();
        let ids = store.get_articles(&[1]).await.unwrap();
        assert!(!ids[&1].indexed);

        let chunks = vec![Chunk { article_id: 1, chunk_index: 0, content: "x".into(), word_count: 1, start_char: 0 }];
        store.replace_chunks_and_mark_indexed(1, &chunks, 1).await.unwrap();

        let refreshed = store.get_articles(&[1]).await.unwrap();
        assert!(refreshed[&1].indexed);
        assert!(refreshed[&1].is_chunked);
        assert_eq!(refreshed[&1].embedding_version, 1);
    }

    #[tokio::test]
    async fn replacing_chunks_again_drops_the_previous_set() {
        let store = ArticleStore::open_in_memory().await.unwrap();
        store.upsert_articles(vec![article("http://a", "a1", "feed", None)]).await.unwrap();

        let first = vec![
            Chunk { article_id: 1, chunk_index: 0, content: "a".into(), word_count: 1, start_char: 0 },
            Chunk { article_id: 1, chunk_index: 1, content: "b".into(), word_count: 1, start_char: 1 },
        ];
        store.replace_chunks_and_mark_indexed(1, &first, 1).await.unwrap();

        let second = vec![Chunk { article_id: 1, chunk_index: 0, content: "c".into(), word_count: 1, start_char: 0 }];
        store.replace_chunks_and_mark_indexed(1, &second, 2).await.unwrap();

        let chunks = store.get_chunks(1, &HashSet::new()).await.unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "c");
    }

    #[tokio::test]
    async fn articles_needing_indexing_excludes_up_to_date_rows() {
        let store = ArticleStore::open_in_memory().await.unwrap();
        store.upsert_articles(vec![article("http://a", "a1", "feed", None), article("http://b", "a2", "feed", None)]).await.unwrap();

        let pending = store.articles_needing_indexing(1).await.unwrap();
        assert_eq!(pending.len(), 2);

        store.replace_chunks_and_mark_indexed(1, &[], 1).await.unwrap();
        let pending = store.articles_needing_indexing(1).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, 2);
    }

    #[tokio::test]
    async fn filter_candidates_by_source_and_author() {
        let store = ArticleStore::open_in_memory().await.unwrap();
        store
            .upsert_articles(vec![
                article("http://a", "a1", "left-feed", Some("Alan Woods")),
                article("http://b", "a2", "right-feed", Some("Someone Else")),
            ])
            .await
            .unwrap();

        let filter = FilterSpec { source: Some("left-feed".to_string()), author: None, date_range: None };
        let matched = store.filter_candidates(&[1, 2], &filter).await.unwrap();
        assert_eq!(matched, vec![1]);

        let filter = FilterSpec { source: None, author: Some("Someone Else".to_string()), date_range: None };
        let matched = store.filter_candidates(&[1, 2], &filter).await.unwrap();
        assert_eq!(matched, vec![2]);
    }

    #[tokio::test]
    async fn top_authors_respects_minimum_count() {
        let store = ArticleStore::open_in_memory().await.unwrap();
        store
            .upsert_articles(vec![
                article("http://a", "a1", "feed", Some("Alan Woods")),
                article("http://b", "a2", "feed", Some("Alan Woods")),
                article("http://c", "a3", "feed", Some("Someone Else")),
            ])
            .await
            .unwrap();

        let top = store.top_authors(2).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].author, "Alan Woods");
        assert_eq!(top[0].article_count, 2);
    }

    #[tokio::test]
    async fn list_sources_counts_articles_per_source() {
        let store = ArticleStore::open_in_memory().await.unwrap();
        store
            .upsert_articles(vec![article("http://a", "a1", "feed-one", None), article("http://b", "a2", "feed-one", None), article("http://c", "a3", "feed-two", None)])
            .await
            .unwrap();

        let sources = store.list_sources().await.unwrap();
        assert_eq!(sources.iter().find(|s| s.source == "feed-one").unwrap().article_count, 2);
        assert_eq!(sources.iter().find(|s| s.source == "feed-two").unwrap().article_count, 1);
    }

    #[tokio::test]
    async fn health_check_reports_healthy_for_an_open_store() {
        let store = ArticleStore::open_in_memory().await.unwrap();
        let health = store.check_health().await.unwrap();
        assert_eq!(health.component, "article_store");
        assert!(matches!(health.status, HealthStatus::Healthy));
    }
}
