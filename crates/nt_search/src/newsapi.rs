use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nt_core::{Error, NewsSearch, Result, SearchHit};
use nt_inference::models::http::{build_client, read_json};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::SearchConfig;

#[derive(Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    #[serde(default)]
    source: Option<NewsApiSource>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct NewsApiSource {
    #[serde(default)]
    name: Option<String>,
}

impl From<NewsApiArticle> for SearchHit {
    fn from(article: NewsApiArticle) -> Self {
        SearchHit {
            title: article.title,
            url: article.url,
            source: article.source.and_then(|s| s.name),
            description: article.description,
            published_at: article.published_at,
        }
    }
}

/// Client for the NewsAPI `everything` endpoint.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    page_size: u32,
}

impl NewsApiClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("News API key is required".to_string()))?;

        let endpoint = format!("{}/everything", config.base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| Error::Config(format!("Invalid news search URL {endpoint}: {e}")))?;

        Ok(Self {
            client: build_client(config.request_timeout)?,
            api_key,
            endpoint,
            page_size: config.page_size,
        })
    }

    fn request_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("language", "en")
            .append_pair("sortBy", "relevancy")
            .append_pair("pageSize", &self.page_size.to_string());
        url
    }
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("page_size", &self.page_size)
            .finish()
    }
}

#[async_trait]
impl NewsSearch for NewsApiClient {
    fn name(&self) -> &str {
        "newsapi"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .get(self.request_url(query))
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        let body: EverythingResponse = read_json("search", response).await?;
        into_hits(body)
    }
}

fn into_hits(body: EverythingResponse) -> Result<Vec<SearchHit>> {
    if body.status != "ok" {
        return Err(Error::Upstream {
            service: "search".to_string(),
            status: 200,
            message: body.message.unwrap_or(body.status),
        });
    }
    Ok(body.articles.into_iter().map(SearchHit::from).collect())
}
