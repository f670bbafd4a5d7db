use nt_core::CandidateArticle;

/// Candidates at or above this similarity count as corroborating.
pub const HIGH_SIMILARITY: f32 = 0.80;

/// Fraction of candidates whose similarity is at least [`HIGH_SIMILARITY`].
///
/// This is a proportion, not a weighted average, so with few candidates a
/// single near-duplicate dominates. `_original` is accepted so callers pass
/// the article alongside its candidates; it does not enter the score.
pub fn consistency_score(_original: &str, candidates: &[CandidateArticle]) -> f32 {
    if candidates.is_empty() {
        return 0.0;
    }

    let corroborating = candidates
        .iter()
        .filter(|c| c.similarity_score >= HIGH_SIMILARITY)
        .count();

    corroborating as f32 / candidates.len() as f32
}
