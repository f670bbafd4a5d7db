//! Partial fuzzy string matching.
//!
//! Scores how well the shorter string fits somewhere inside the longer one,
//! on a 0–100 scale. Comparison is case-sensitive and the inputs are used
//! as given.

/// Best alignment of the shorter string against any same-length window of the
/// longer one, also considering the partial windows at either edge.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let best = if a.len() == b.len() {
        best_window(&a, &b).max(best_window(&b, &a))
    } else if a.len() < b.len() {
        best_window(&a, &b)
    } else {
        best_window(&b, &a)
    };

    best.round_ties_even() as u8
}

fn best_window(needle: &[char], haystack: &[char]) -> f64 {
    let n = needle.len();
    let h = haystack.len();
    let mut best: f64 = 0.0;

    // Prefixes shorter than the needle.
    for end in 1..n.min(h) {
        best = best.max(indel_ratio(needle, &haystack[..end]));
    }

    for start in 0..=h - n {
        best = best.max(indel_ratio(needle, &haystack[start..start + n]));
        if best >= 100.0 {
            return best;
        }
    }

    // Suffixes shorter than the needle.
    for start in (h - n + 1)..h {
        best = best.max(indel_ratio(needle, &haystack[start..]));
    }

    best
}

/// Normalized indel similarity: `2 * LCS / (|a| + |b|)`, scaled to 100.
fn indel_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
