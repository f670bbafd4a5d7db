use std::fmt;

use nt_core::{ArticleAnalysis, ArticleInput, Result};
use nt_inference::{consistency_score, EntityExtractor};
use tracing::info;

use crate::search::ArticleSearch;

/// Chains entity extraction, related-article search and aggregation.
pub struct Corroborator {
    extractor: EntityExtractor,
    search: ArticleSearch,
}

impl fmt::Debug for Corroborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Corroborator")
            .field("extractor", &self.extractor)
            .field("search", &self.search)
            .finish()
    }
}

impl Corroborator {
    pub fn new(extractor: EntityExtractor, search: ArticleSearch) -> Self {
        Self { extractor, search }
    }

    /// Corroborate an article against related coverage.
    ///
    /// Entity extraction failures abort the request; search problems only
    /// shrink the candidate list.
    pub async fn corroborate(&self, input: &ArticleInput) -> Result<ArticleAnalysis> {
        info!(
            "📰 Corroborating {}",
            input.title.as_deref().unwrap_or("untitled article")
        );

        let entities = self.extractor.extract(&input.content).await?;
        let candidates = self.search.find_related(&input.content, &entities).await;
        let consistency_score = consistency_score(&input.content, &candidates);

        info!(
            "✅ {} entities, {} candidates, consistency {:.2}",
            entities.len(),
            candidates.len(),
            consistency_score
        );

        Ok(ArticleAnalysis {
            entities,
            candidates,
            consistency_score,
        })
    }
}
