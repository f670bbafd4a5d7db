use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nt_core::{NewsSearch, Result, SearchHit};
use nt_inference::ModelKind;
use tracing::info;

pub mod newsapi;
pub mod pipeline;
pub mod search;

pub use newsapi::NewsApiClient;
pub use pipeline::Corroborator;
pub use search::{build_query, ArticleSearch};

pub const DEFAULT_NEWS_BASE_URL: &str = "https://newsapi.org/v2";

/// What a search candidate's description is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SimilarityAnchor {
    /// The submitted article's content.
    #[default]
    Article,
    /// The candidate's own description. Every candidate scores as a
    /// near-duplicate, whatever the article says.
    Candidate,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub page_size: u32,
    pub concurrency: usize,
    pub anchor: SimilarityAnchor,
    pub request_timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_NEWS_BASE_URL.to_string(),
            page_size: 20,
            concurrency: 4,
            anchor: SimilarityAnchor::Article,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Search backend used with the offline models: never finds anything.
#[derive(Debug, Default)]
pub struct OfflineSearch;

#[async_trait]
impl NewsSearch for OfflineSearch {
    fn name(&self) -> &str {
        "offline"
    }

    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>> {
        Ok(Vec::new())
    }
}

pub fn create_search(config: &SearchConfig, kind: ModelKind) -> Result<Arc<dyn NewsSearch>> {
    match kind {
        ModelKind::Remote => {
            let client = NewsApiClient::new(config)?;
            info!("🔎 Using news search at {}", config.base_url);
            Ok(Arc::new(client))
        }
        ModelKind::Dummy => {
            info!("🔎 Using offline search");
            Ok(Arc::new(OfflineSearch))
        }
    }
}
