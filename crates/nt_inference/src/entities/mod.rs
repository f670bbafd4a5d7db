use std::fmt;
use std::sync::Arc;

use nt_core::{Entity, EntityRecognizer, Result};
use tracing::debug;

/// Spans scoring below this are discarded.
pub const MIN_ENTITY_CONFIDENCE: f32 = 0.60;

pub struct EntityExtractor {
    recognizer: Arc<dyn EntityRecognizer>,
}

impl fmt::Debug for EntityExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityExtractor")
            .field("recognizer", &self.recognizer.name())
            .finish()
    }
}

impl EntityExtractor {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Extract entities from the article text.
    ///
    /// Keeps spans with a confidence of at least [`MIN_ENTITY_CONFIDENCE`] and
    /// a non-empty label and word, in the order the recognizer produced them.
    /// Duplicates are kept. Recognizer failures are returned to the caller.
    pub async fn extract(&self, text: &str) -> Result<Vec<Entity>> {
        let spans = self.recognizer.recognize(text).await?;
        let total = spans.len();

        let entities: Vec<Entity> = spans
            .into_iter()
            .filter(|span| {
                span.score >= MIN_ENTITY_CONFIDENCE
                    && !span.entity_group.is_empty()
                    && !span.word.is_empty()
            })
            .map(|span| Entity {
                text: span.word,
                kind: span.entity_group,
                confidence: span.score,
            })
            .collect();

        debug!(
            "Kept {}/{} entities from {}",
            entities.len(),
            total,
            self.recognizer.name()
        );
        Ok(entities)
    }
}
