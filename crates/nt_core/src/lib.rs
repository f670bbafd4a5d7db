pub mod models;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use models::{EntityRecognizer, NewsSearch, SentenceSimilarity, TextClassifier};
pub use types::*;
