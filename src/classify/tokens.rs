//! Shared tokenizer for both similarity strategies.

use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

/// Lowercase and strip diacritics (é -> e), so extraction artifacts and
/// accented Dutch words compare equal.
#[must_use]
pub fn fold(text: &str) -> String {
    text.nfkd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Split folded text on non-alphanumeric boundaries.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    fold(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokens that carry signal: tokenized, minus stopwords.
#[must_use]
pub fn content_tokens(text: &str, stopwords: &HashSet<String>) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| !stopwords.contains(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_strips_diacritics() {
        assert_eq!(fold("Carrosserieën"), "carrosserieen");
        assert_eq!(fold("Één"), "een");
    }

    #[test]
    fn test_tokenize_splits_codes() {
        assert_eq!(tokenize("B1-K1-W2"), vec!["b1", "k1", "w2"]);
    }

    #[test]
    fn test_content_tokens_drops_stopwords() {
        let stopwords: HashSet<String> =
            ["een", "de"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(
            content_tokens("metselen van een muur", &stopwords),
            vec!["metselen", "van", "muur"]
        );
    }
}
