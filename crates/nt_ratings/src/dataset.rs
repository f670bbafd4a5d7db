use std::io::Read;
use std::path::Path;

use nt_core::{Error, RatingRecord, Result};
use tracing::{info, warn};

/// The source rating reference table.
///
/// Loaded once at start-up and never mutated afterwards, so it can be shared
/// between requests behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct RatingDataset {
    records: Vec<RatingRecord>,
}

impl RatingDataset {
    pub fn new(records: Vec<RatingRecord>) -> Self {
        Self { records }
    }

    /// Load the dataset from a delimited file with a header row.
    pub fn load(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| Error::Dataset(format!("{}: {}", path.display(), e)))?;

        let dataset = Self::from_csv(reader)
            .map_err(|e| Error::Dataset(format!("{}: {}", path.display(), e)))?;

        info!(
            "📚 Loaded {} source ratings from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Load the dataset from any reader, e.g. an in-memory fixture.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        Self::from_csv(reader).map_err(|e| Error::Dataset(e.to_string()))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> std::result::Result<Self, csv::Error> {
        let records = reader
            .deserialize::<RatingRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if records.is_empty() {
            warn!("Source rating dataset has no rows");
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[RatingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
