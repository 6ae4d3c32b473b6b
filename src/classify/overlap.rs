//! Lexical keyword-overlap scoring: the fallback strategy when the vector
//! path is inconclusive or degenerate.

use std::collections::HashSet;

use super::tokens::tokenize;
use super::SimilarityScorer;

/// Tokens this short carry no signal in Dutch compound-heavy text.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Counts keyword overlap between the statement and each candidate's
/// pre-extracted keyword set.
#[derive(Debug, Default)]
pub struct OverlapScorer;

impl SimilarityScorer for OverlapScorer {
    fn name(&self) -> &'static str {
        "keyword-overlap"
    }

    /// Always produces a score vector (possibly all zeros); it is the path
    /// of last resort before the largest-keyword-set tie-break.
    #[allow(clippy::cast_precision_loss)]
    fn score(
        &self,
        statement: &str,
        candidates: &[&str],
        stopwords: &HashSet<String>,
    ) -> Option<Vec<f32>> {
        if candidates.is_empty() {
            return None;
        }
        let tokens = keyword_set(statement, stopwords);
        Some(
            candidates
                .iter()
                .map(|c| {
                    let keywords = keyword_set(c, stopwords);
                    tokens.intersection(&keywords).count() as f32
                })
                .collect(),
        )
    }
}

/// Keywords of a text: tokens longer than [`MIN_KEYWORD_LEN`] that are not
/// stopwords.
#[must_use]
pub fn keyword_set(text: &str, stopwords: &HashSet<String>) -> HashSet<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| t.len() > MIN_KEYWORD_LEN && !stopwords.contains(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stopwords() -> HashSet<String> {
        ["kan", "een", "van", "aan", "de", "voor"]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    #[test]
    fn test_keyword_set_filters_short_and_stop() {
        let set = keyword_set("kan de muur metselen en voegen", &stopwords());
        assert!(set.contains("metselen"));
        assert!(set.contains("voegen"));
        // "muur" has exactly 4 chars, survives; "en" is too short
        assert!(set.contains("muur"));
        assert!(!set.contains("en"));
        assert!(!set.contains("kan"));
    }

    #[test]
    fn test_overlap_counts() {
        let scorer = OverlapScorer;
        let sims = scorer
            .score(
                "kan een muur metselen",
                &["metselen van een muur", "rapporteren aan de klant"],
                &stopwords(),
            )
            .unwrap();
        assert!((sims[0] - 2.0).abs() < f32::EPSILON);
        assert!(sims[1].abs() < f32::EPSILON);
    }
}
