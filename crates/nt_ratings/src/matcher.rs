use std::fmt;
use std::sync::Arc;

use nt_core::{Error, RatingMatch, Result};
use tracing::debug;

use crate::dataset::RatingDataset;
use crate::fuzz::partial_ratio;

/// Minimum partial ratio for a record to be returned.
pub const MIN_MATCH_SCORE: u8 = 70;

/// Upper bound on returned matches.
pub const MAX_MATCHES: usize = 5;

/// Longest source name accepted for lookup, in characters. Scoring cost grows
/// with the square of the input length, so callers reject longer names up front.
pub const MAX_SOURCE_CHARS: usize = 256;

pub fn validate_source(source: &str) -> Result<()> {
    let len = source.chars().count();
    if len > MAX_SOURCE_CHARS {
        return Err(Error::InvalidInput(format!(
            "source name is {} characters, at most {} allowed",
            len, MAX_SOURCE_CHARS
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct RatingMatcher {
    dataset: Arc<RatingDataset>,
}

impl fmt::Debug for RatingMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatingMatcher")
            .field("records", &self.dataset.len())
            .finish()
    }
}

impl RatingMatcher {
    pub fn new(dataset: Arc<RatingDataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &RatingDataset {
        &self.dataset
    }

    /// Look up the ratings whose source name fuzzily matches `source`.
    ///
    /// Matches are ordered by score, highest first. Equal scores come out in
    /// the reverse of their dataset order: the list is stably sorted
    /// ascending and then reversed as a whole. At most [`MAX_MATCHES`] are
    /// returned; fewer matches is not an error.
    pub fn lookup(&self, source: &str) -> Vec<RatingMatch> {
        if source.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<_> = self
            .dataset
            .records()
            .iter()
            .map(|record| (partial_ratio(&record.news_source, source), record))
            .filter(|(score, _)| *score >= MIN_MATCH_SCORE)
            .collect();

        scored.sort_by_key(|(score, _)| *score);
        scored.reverse();

        debug!("{} rating records match {:?}", scored.len(), source);

        scored
            .into_iter()
            .take(MAX_MATCHES)
            .map(|(score, record)| RatingMatch {
                record: record.clone(),
                match_score: score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nt_core::RatingRecord;

    fn matcher(names: &[&str]) -> RatingMatcher {
        let records = names
            .iter()
            .map(|name| RatingRecord::new(*name, "center"))
            .collect();
        RatingMatcher::new(Arc::new(RatingDataset::new(records)))
    }

    fn names(matches: &[RatingMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.record.news_source.as_str()).collect()
    }

    #[test]
    fn test_cnn_variants_match_fox_does_not() {
        let matcher = matcher(&["CNN", "CNN International", "Fox News"]);
        let matches = matcher.lookup("CNN");

        assert_eq!(matches.len(), 2);
        assert!(names(&matches).contains(&"CNN"));
        assert!(names(&matches).contains(&"CNN International"));
        assert!(matches.iter().all(|m| m.match_score >= MIN_MATCH_SCORE));
    }

    #[test]
    fn test_ties_come_out_in_reverse_dataset_order() {
        let matcher = matcher(&["CNN", "CNN International", "Fox News"]);
        let matches = matcher.lookup("CNN");

        // Both score 100; the later row is presented first.
        assert_eq!(names(&matches), vec!["CNN International", "CNN"]);
    }

    #[test]
    fn test_higher_scores_first() {
        let matcher = matcher(&["BBC News", "BBX", "BBC"]);
        let matches = matcher.lookup("BBC");

        assert_eq!(matches[0].match_score, 100);
        assert!(matches
            .windows(2)
            .all(|pair| pair[0].match_score >= pair[1].match_score));
        // "BBX" aligns with the "BB" prefix: 2 * 2 / 5 -> 80.
        assert_eq!(names(&matches), vec!["BBC", "BBC News", "BBX"]);
        assert_eq!(matches[2].match_score, 80);
    }

    #[test]
    fn test_never_more_than_five() {
        let sources: Vec<String> = (0..20).map(|i| format!("Daily News {i}")).collect();
        let sources: Vec<&str> = sources.iter().map(String::as_str).collect();
        let matcher = matcher(&sources);

        let matches = matcher.lookup("Daily News");
        assert_eq!(matches.len(), MAX_MATCHES);
        assert_eq!(matches[0].record.news_source, "Daily News 19");
    }

    #[test]
    fn test_fewer_than_five_is_not_an_error() {
        let matcher = matcher(&["The Guardian", "Guardian Weekly", "Bloomberg"]);
        let matches = matcher.lookup("Guardian");
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_no_match_and_empty_input() {
        let matcher = matcher(&["Reuters"]);
        assert!(matcher.lookup("Al Jazeera").is_empty());
        assert!(matcher.lookup("").is_empty());
    }

    #[test]
    fn test_input_is_scored_as_given() {
        let matcher = matcher(&["CNN", "Fox News"]);

        // A lone space aligns with the space inside "Fox News".
        let matches = matcher.lookup(" ");
        assert_eq!(names(&matches), vec!["Fox News"]);
        assert_eq!(matches[0].match_score, 100);

        // Surrounding whitespace is part of the compared text: the best fit
        // for " Reuters" is the "Reuters" prefix, 2 * 7 / 15 -> 93.
        let matcher = self::matcher(&["Reuters Agency"]);
        assert_eq!(matcher.lookup("Reuters")[0].match_score, 100);
        assert_eq!(matcher.lookup(" Reuters")[0].match_score, 93);
    }

    #[test]
    fn test_validate_source_length() {
        assert!(validate_source("CNN").is_ok());
        assert!(validate_source(&"a".repeat(MAX_SOURCE_CHARS)).is_ok());

        let err = validate_source(&"a".repeat(MAX_SOURCE_CHARS + 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
