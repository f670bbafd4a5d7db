use std::fmt;

use async_trait::async_trait;
use nt_core::{EntityRecognizer, Error, RecognizedSpan, Result, SentenceSimilarity};
use reqwest::Client;
use serde::Serialize;

use super::http::{build_client, read_json};
use crate::InferenceConfig;

#[derive(Serialize)]
struct NerRequest<'a> {
    inputs: &'a str,
}

#[derive(Serialize)]
struct SimilarityInputs<'a> {
    source_sentence: &'a str,
    sentences: &'a [String],
}

#[derive(Serialize)]
struct SimilarityRequest<'a> {
    inputs: SimilarityInputs<'a>,
}

/// Client for the hosted inference API, serving both the token
/// classification and the sentence-similarity models.
pub struct HuggingFaceModel {
    client: Client,
    api_key: String,
    base_url: String,
    ner_model: String,
    similarity_model: String,
}

impl HuggingFaceModel {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("Hugging Face API key is required".to_string()))?;

        Ok(Self {
            client: build_client(config.request_timeout)?,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ner_model: config.ner_model.clone(),
            similarity_model: config.similarity_model.clone(),
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url, model)
    }
}

impl fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("ner_model", &self.ner_model)
            .field("similarity_model", &self.similarity_model)
            .finish()
    }
}

#[async_trait]
impl EntityRecognizer for HuggingFaceModel {
    fn name(&self) -> &str {
        &self.ner_model
    }

    async fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>> {
        let response = self
            .client
            .post(self.model_url(&self.ner_model))
            .bearer_auth(&self.api_key)
            .json(&NerRequest { inputs: text })
            .send()
            .await?;

        read_json("ner", response).await
    }
}

#[async_trait]
impl SentenceSimilarity for HuggingFaceModel {
    fn name(&self) -> &str {
        &self.similarity_model
    }

    async fn similarity(&self, source: &str, sentences: &[String]) -> Result<Vec<f32>> {
        let request = SimilarityRequest {
            inputs: SimilarityInputs {
                source_sentence: source,
                sentences,
            },
        };

        let response = self
            .client
            .post(self.model_url(&self.similarity_model))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        read_json("similarity", response).await
    }
}
