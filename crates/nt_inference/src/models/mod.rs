use std::sync::Arc;

use nt_core::Result;
use tracing::info;

use crate::{InferenceConfig, ModelKind};

pub mod dummy;
pub mod gradio;
pub mod http;
pub mod huggingface;

pub use dummy::DummyModel;
pub use gradio::GradioClassifier;
pub use huggingface::HuggingFaceModel;
pub use nt_core::{EntityRecognizer, SentenceSimilarity, TextClassifier};

/// The three inference capabilities the service consumes.
#[derive(Clone)]
pub struct Models {
    pub recognizer: Arc<dyn EntityRecognizer>,
    pub similarity: Arc<dyn SentenceSimilarity>,
    pub classifier: Arc<dyn TextClassifier>,
}

pub fn create_models(config: &InferenceConfig) -> Result<Models> {
    match config.model {
        ModelKind::Remote => {
            let hf = Arc::new(HuggingFaceModel::new(config)?);
            let classifier = Arc::new(GradioClassifier::new(config)?);
            info!(
                "🧠 Using remote models: ner={}, similarity={}, classifier={}",
                config.ner_model, config.similarity_model, config.classifier_model
            );
            Ok(Models {
                recognizer: hf.clone(),
                similarity: hf,
                classifier,
            })
        }
        ModelKind::Dummy => {
            let model = Arc::new(DummyModel::new());
            info!("🧠 Using offline dummy models");
            Ok(Models {
                recognizer: model.clone(),
                similarity: model.clone(),
                classifier: model,
            })
        }
    }
}
