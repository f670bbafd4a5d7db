use async_trait::async_trait;
use crate::types::{RawClassification, RecognizedSpan, SearchHit};
use crate::Result;

#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    fn name(&self) -> &str;

    /// Run named-entity recognition over the whole text, in document order.
    async fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>>;
}

#[async_trait]
pub trait SentenceSimilarity: Send + Sync {
    fn name(&self) -> &str;

    /// Score each of `sentences` against `source`, one score per sentence.
    async fn similarity(&self, source: &str, sentences: &[String]) -> Result<Vec<f32>>;
}

#[async_trait]
pub trait NewsSearch: Send + Sync {
    fn name(&self) -> &str;

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

#[async_trait]
pub trait TextClassifier: Send + Sync {
    fn name(&self) -> &str;

    async fn classify(&self, text: &str) -> Result<Vec<RawClassification>>;
}
