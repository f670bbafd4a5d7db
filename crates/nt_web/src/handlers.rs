use axum::{extract::State, Json};
use nt_core::{ArticleAnalysis, ArticleInput, ClassificationResult, Error, RatingMatch};
use nt_ratings::validate_source;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::{error::ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub source: String,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub ratings: usize,
}

pub async fn corroborate(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ArticleInput>,
) -> Result<Json<ArticleAnalysis>, ApiError> {
    let analysis = state.corroborator.corroborate(&input).await?;
    Ok(Json(analysis))
}

pub async fn rating(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RatingRequest>,
) -> Result<Json<Vec<RatingMatch>>, ApiError> {
    validate_source(&request.source)?;

    // Fuzzy scanning is CPU-bound; keep it off the async workers.
    let ratings = state.ratings.clone();
    let matches = tokio::task::spawn_blocking(move || ratings.lookup(&request.source))
        .await
        .map_err(|e| Error::External(anyhow::anyhow!("rating lookup task failed: {e}")))?;
    Ok(Json(matches))
}

pub async fn classify(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassificationResult>, ApiError> {
    let result = state.classifier.classify(&request.content).await?;
    Ok(Json(result))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Health> {
    Json(Health {
        status: "ok",
        ratings: state.ratings.dataset().len(),
    })
}
