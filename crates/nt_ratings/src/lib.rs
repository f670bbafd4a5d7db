use std::path::PathBuf;

pub mod dataset;
pub mod fuzz;
pub mod matcher;

pub use dataset::RatingDataset;
pub use fuzz::partial_ratio;
pub use matcher::{validate_source, RatingMatcher, MAX_MATCHES, MAX_SOURCE_CHARS, MIN_MATCH_SCORE};

pub const DEFAULT_RATINGS_PATH: &str = "allsides.csv";

#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub path: PathBuf,
    pub delimiter: u8,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_RATINGS_PATH),
            delimiter: b',',
        }
    }
}

impl DatasetConfig {
    pub fn load(&self) -> nt_core::Result<RatingDataset> {
        RatingDataset::load(&self.path, self.delimiter)
    }
}

