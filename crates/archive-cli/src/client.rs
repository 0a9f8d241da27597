use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Default, Serialize)]
pub struct SearchFilters {
    pub source: Option<String>,
    pub author: Option<String>,
    pub date_range: Option<String>,
    pub custom_start: Option<NaiveDate>,
    pub custom_end: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct SearchRequest {
    query: String,
    filters: SearchFilters,
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchResult {
    pub article_id: i64,
    pub title: String,
    pub url: String,
    pub source: String,
    pub author: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub excerpt: String,
    pub matched_phrase: Option<String>,
    pub matched_sections: usize,
    pub score: f32,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ParsedQuery {
    pub semantic_terms: Vec<String>,
    pub exact_phrases: Vec<String>,
    pub title_phrases: Vec<String>,
    pub author_filter: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub total: usize,
    pub query_time_ms: u64,
    pub parsed_query: ParsedQuery,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SourceStat {
    pub source: String,
    pub article_count: usize,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AuthorStat {
    pub author: String,
    pub article_count: usize,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct StoreStats {
    pub article_count: usize,
    pub chunk_count: usize,
    pub indexed_count: usize,
    pub source_count: usize,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HealthReport {
    pub status: serde_json::Value,
    pub components: Vec<ComponentHealth>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ComponentHealth {
    pub component: String,
    pub status: serde_json::Value,
    pub last_check: DateTime<Utc>,
    pub details: Option<std::collections::HashMap<String, String>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct IndexReport {
    pub articles_processed: usize,
    pub articles_failed: usize,
    pub chunks_written: usize,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn search(&self, query: &str, filters: SearchFilters, limit: Option<usize>, offset: Option<usize>) -> Result<SearchResponse> {
        let url = format!("{}/search", self.base_url);
        let request = SearchRequest { query: query.to_string(), filters, limit, offset };

        let response = self.client.post(&url).json(&request).send().await.context("failed to send search request")?;
        Self::into_json(response).await.context("failed to parse search response")
    }

    pub async fn sources(&self) -> Result<Vec<SourceStat>> {
        let url = format!("{}/sources", self.base_url);
        let response = self.client.get(&url).send().await.context("failed to send sources request")?;
        Self::into_json(response).await.context("failed to parse sources response")
    }

    pub async fn top_authors(&self, min_count: usize) -> Result<Vec<AuthorStat>> {
        let url = format!("{}/authors?min_count={min_count}", self.base_url);
        let response = self.client.get(&url).send().await.context("failed to send authors request")?;
        Self::into_json(response).await.context("failed to parse authors response")
    }

    pub async fn stats(&self) -> Result<StoreStats> {
        let url = format!("{}/stats", self.base_url);
        let response = self.client.get(&url).send().await.context("failed to send stats request")?;
        Self::into_json(response).await.context("failed to parse stats response")
    }

    pub async fn health(&self) -> Result<HealthReport> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await.context("failed to send health request")?;
        Self::into_json(response).await.context("failed to parse health response")
    }

    pub async fn build_index(&self) -> Result<IndexReport> {
        let url = format!("{}/index/build", self.base_url);
        let response = self.client.post(&url).send().await.context("failed to send index build request")?;
        Self::into_json(response).await.context("failed to parse index build response")
    }

    pub async fn update_index(&self) -> Result<IndexReport> {
        let url = format!("{}/index/update", self.base_url);
        let response = self.client.post(&url).send().await.context("failed to send index update request")?;
        Self::into_json(response).await.context("failed to parse index update response")
    }

    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    async fn into_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("request failed with status {}: {}", status, text);
        }
        response.json::<T>().await.map_err(anyhow::Error::from)
    }
}
