use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use nt_core::{ClassificationResult, Result, TextClassifier};

pub const UNKNOWN_PREDICTION: &str = "unknown";

pub struct ClassifierAdapter {
    classifier: Arc<dyn TextClassifier>,
}

impl fmt::Debug for ClassifierAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierAdapter")
            .field("classifier", &self.classifier.name())
            .finish()
    }
}

impl ClassifierAdapter {
    pub fn new(classifier: Arc<dyn TextClassifier>) -> Self {
        Self { classifier }
    }

    /// Classify article content, reshaping the first result the classifier
    /// returns. Classifier failures are returned to the caller.
    pub async fn classify(&self, content: &str) -> Result<ClassificationResult> {
        let first = self.classifier.classify(content).await?.into_iter().next();

        let (prediction, confidences): (Option<String>, BTreeMap<String, f32>) = match first {
            Some(result) => (
                result.label,
                result
                    .confidences
                    .into_iter()
                    .map(|c| (c.label, c.confidence))
                    .collect(),
            ),
            None => (None, BTreeMap::new()),
        };

        Ok(ClassificationResult {
            prediction: prediction.unwrap_or_else(|| UNKNOWN_PREDICTION.to_string()),
            confidences,
        })
    }
}
