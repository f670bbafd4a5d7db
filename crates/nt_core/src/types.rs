use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An article submitted for corroboration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleInput {
    pub content: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl ArticleInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A named span that survived confidence filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub confidence: f32,
}

/// A related article retrieved by search and scored against the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateArticle {
    pub title: String,
    pub url: String,
    pub source: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub similarity_score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleAnalysis {
    pub entities: Vec<Entity>,
    pub candidates: Vec<CandidateArticle>,
    pub consistency_score: f32,
}

/// One row of the source rating dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub news_source: String,
    pub rating: String,
    #[serde(default)]
    pub rating_num: Option<f32>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub agree: Option<u32>,
    #[serde(default)]
    pub disagree: Option<u32>,
    #[serde(default)]
    pub perc_agree: Option<f32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub editorial_review: Option<String>,
    #[serde(default)]
    pub blind_survey: Option<String>,
    #[serde(default)]
    pub third_party_analysis: Option<String>,
    #[serde(default)]
    pub independent_research: Option<String>,
    #[serde(default)]
    pub confidence_level: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub wiki: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub screen_name: Option<String>,
}

impl RatingRecord {
    /// A record with only the required columns filled in.
    pub fn new(news_source: impl Into<String>, rating: impl Into<String>) -> Self {
        Self {
            news_source: news_source.into(),
            rating: rating.into(),
            rating_num: None,
            kind: None,
            agree: None,
            disagree: None,
            perc_agree: None,
            url: None,
            editorial_review: None,
            blind_survey: None,
            third_party_analysis: None,
            independent_research: None,
            confidence_level: None,
            twitter: None,
            wiki: None,
            facebook: None,
            screen_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingMatch {
    pub record: RatingRecord,
    pub match_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub prediction: String,
    pub confidences: BTreeMap<String, f32>,
}

/// A raw item as returned by a named-entity recognition capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedSpan {
    pub entity_group: String,
    pub word: String,
    pub score: f32,
}

/// A raw search result. Every field is optional upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelConfidence {
    pub label: String,
    pub confidence: f32,
}

/// A raw entry from a text classification capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawClassification {
    #[serde(default)]
    pub label: Option<String>,
    pub confidences: Vec<LabelConfidence>,
}
