use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;
use nt_core::{
    EntityRecognizer, LabelConfidence, RawClassification, RecognizedSpan, Result,
    SentenceSimilarity, TextClassifier,
};

/// Offline stand-in for the remote models. Deterministic, no network.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

fn tokens(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

#[async_trait]
impl EntityRecognizer for DummyModel {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>> {
        // Every capitalized word is a MISC entity.
        Ok(text
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| w.chars().next().is_some_and(char::is_uppercase))
            .map(|w| RecognizedSpan {
                entity_group: "MISC".to_string(),
                word: w.to_string(),
                score: 0.9,
            })
            .collect())
    }
}

#[async_trait]
impl SentenceSimilarity for DummyModel {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn similarity(&self, source: &str, sentences: &[String]) -> Result<Vec<f32>> {
        let source = tokens(source);
        Ok(sentences
            .iter()
            .map(|sentence| {
                let other = tokens(sentence);
                let union = source.union(&other).count();
                if union == 0 {
                    0.0
                } else {
                    source.intersection(&other).count() as f32 / union as f32
                }
            })
            .collect())
    }
}

#[async_trait]
impl TextClassifier for DummyModel {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn classify(&self, _text: &str) -> Result<Vec<RawClassification>> {
        let confidences = [("center", 0.6), ("left", 0.2), ("right", 0.2)]
            .into_iter()
            .map(|(label, confidence)| LabelConfidence {
                label: label.to_string(),
                confidence,
            })
            .collect();

        Ok(vec![RawClassification {
            label: Some("center".to_string()),
            confidences,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_recognizes_capitalized_words() {
        let model = DummyModel::new();
        let spans = model
            .recognize("Officials in Brussels met NATO leaders.")
            .await
            .unwrap();
        let words: Vec<_> = spans.iter().map(|s| s.word.as_str()).collect();
        assert_eq!(words, vec!["Officials", "Brussels", "NATO"]);
    }

    #[tokio::test]
    async fn test_dummy_similarity_is_token_overlap() {
        let model = DummyModel::new();
        let scores = model
            .similarity(
                "storm hits coast",
                &["storm hits coast".to_string(), "unrelated".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(scores, vec![1.0, 0.0]);
    }

    #[tokio::test]
    async fn test_dummy_classification() {
        let model = DummyModel::new();
        let results = model.classify("anything").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label.as_deref(), Some("center"));
    }
}
