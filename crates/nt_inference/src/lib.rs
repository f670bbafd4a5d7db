use std::time::Duration;

pub mod models;
pub mod entities;
pub mod similarity;
pub mod classification;
pub mod consistency;

pub const DEFAULT_HF_BASE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_NER_MODEL: &str = "dslim/bert-base-NER";
pub const DEFAULT_SIMILARITY_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
pub const DEFAULT_CLASSIFIER_URL: &str = "http://localhost:7860/api/predict";
pub const DEFAULT_CLASSIFIER_MODEL: &str = "news-bias-classifier";

/// Which implementation backs the inference capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ModelKind {
    /// Hosted models over HTTP.
    #[default]
    Remote,
    /// Deterministic offline models, for local runs and tests.
    Dummy,
}

#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub model: ModelKind,
    pub api_key: Option<String>,
    pub base_url: String,
    pub ner_model: String,
    pub similarity_model: String,
    pub classifier_url: String,
    pub classifier_model: String,
    pub request_timeout: Duration,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::Remote,
            api_key: None,
            base_url: DEFAULT_HF_BASE_URL.to_string(),
            ner_model: DEFAULT_NER_MODEL.to_string(),
            similarity_model: DEFAULT_SIMILARITY_MODEL.to_string(),
            classifier_url: DEFAULT_CLASSIFIER_URL.to_string(),
            classifier_model: DEFAULT_CLASSIFIER_MODEL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

pub use classification::ClassifierAdapter;
pub use consistency::consistency_score;
pub use entities::EntityExtractor;
pub use models::{create_models, Models};
pub use similarity::SimilarityScorer;
