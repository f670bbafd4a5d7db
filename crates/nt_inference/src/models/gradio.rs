use std::fmt;

use async_trait::async_trait;
use nt_core::{RawClassification, Result, TextClassifier};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http::{build_client, read_json};
use crate::InferenceConfig;

#[derive(Serialize)]
struct PredictRequest<'a> {
    model: &'a str,
    data: [&'a str; 1],
}

#[derive(Deserialize)]
struct PredictResponse {
    data: Vec<RawClassification>,
}

/// Client for a classifier exposed through a `predict` style endpoint.
pub struct GradioClassifier {
    client: Client,
    url: String,
    model: String,
}

impl GradioClassifier {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.request_timeout)?,
            url: config.classifier_url.clone(),
            model: config.classifier_model.clone(),
        })
    }
}

impl fmt::Debug for GradioClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradioClassifier")
            .field("url", &self.url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl TextClassifier for GradioClassifier {
    fn name(&self) -> &str {
        &self.model
    }

    async fn classify(&self, text: &str) -> Result<Vec<RawClassification>> {
        let request = PredictRequest {
            model: &self.model,
            data: [text],
        };

        let response = self.client.post(&self.url).json(&request).send().await?;
        let body: PredictResponse = read_json("classifier", response).await?;
        Ok(body.data)
    }
}
