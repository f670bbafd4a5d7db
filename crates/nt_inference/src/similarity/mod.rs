use std::fmt;
use std::sync::Arc;

use nt_core::SentenceSimilarity;
use tracing::warn;

/// Scores a pair of texts. Never fails: errors and empty answers score 0.
#[derive(Clone)]
pub struct SimilarityScorer {
    model: Arc<dyn SentenceSimilarity>,
}

impl fmt::Debug for SimilarityScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimilarityScorer")
            .field("model", &self.model.name())
            .finish()
    }
}

impl SimilarityScorer {
    pub fn new(model: Arc<dyn SentenceSimilarity>) -> Self {
        Self { model }
    }

    pub async fn score(&self, anchor: &str, other: &str) -> f32 {
        let sentences = [other.to_string()];
        match self.model.similarity(anchor, &sentences).await {
            Ok(scores) => scores.first().copied().unwrap_or(0.0),
            Err(e) => {
                warn!("Similarity scoring with {} failed: {}", self.model.name(), e);
                0.0
            }
        }
    }
}
