//! Term-frequency / inverse-document-frequency scoring with cosine
//! similarity: the primary strategy for matching a statement to a work
//! process description.

use std::collections::{HashMap, HashSet};

use super::tokens::content_tokens;
use super::SimilarityScorer;

/// Tf-idf vectorizer over the tiny per-statement corpus
/// `[statement] + candidate descriptions`.
#[derive(Debug, Default)]
pub struct TfidfScorer;

impl SimilarityScorer for TfidfScorer {
    fn name(&self) -> &'static str {
        "tfidf-cosine"
    }

    /// Returns `None` when vectorization degenerates: the statement has no
    /// signal tokens, or every candidate vector has zero norm (e.g. all
    /// descriptions empty). The caller routes those to the fallback path.
    fn score(
        &self,
        statement: &str,
        candidates: &[&str],
        stopwords: &HashSet<String>,
    ) -> Option<Vec<f32>> {
        if candidates.is_empty() {
            return None;
        }
        let mut docs = Vec::with_capacity(candidates.len() + 1);
        docs.push(content_tokens(statement, stopwords));
        for c in candidates {
            docs.push(content_tokens(c, stopwords));
        }
        if docs[0].is_empty() {
            return None;
        }

        let vocab = build_vocab(&docs);
        let n_docs = docs.len();
        let vectors: Vec<Vec<f32>> = docs
            .iter()
            .map(|doc| vectorize(doc, &vocab, n_docs))
            .collect();

        let sims: Vec<f32> = vectors[1..]
            .iter()
            .map(|v| cosine(&vectors[0], v))
            .collect();
        if sims.iter().all(|s| *s == 0.0) && candidates.iter().all(|c| c.trim().is_empty()) {
            return None;
        }
        Some(sims)
    }
}

/// Token -> (column index, document frequency).
fn build_vocab(docs: &[Vec<String>]) -> HashMap<String, (usize, usize)> {
    let mut vocab: HashMap<String, (usize, usize)> = HashMap::new();
    for doc in docs {
        let unique: HashSet<&String> = doc.iter().collect();
        for token in unique {
            let next = vocab.len();
            let entry = vocab.entry(token.clone()).or_insert((next, 0));
            entry.1 += 1;
        }
    }
    vocab
}

fn vectorize(doc: &[String], vocab: &HashMap<String, (usize, usize)>, n_docs: usize) -> Vec<f32> {
    let mut vector = vec![0.0f32; vocab.len()];
    if doc.is_empty() {
        return vector;
    }
    let mut counts: HashMap<&String, usize> = HashMap::new();
    for token in doc {
        *counts.entry(token).or_insert(0) += 1;
    }
    #[allow(clippy::cast_precision_loss)]
    for (token, count) in counts {
        let Some(&(index, df)) = vocab.get(token) else {
            continue;
        };
        let tf = count as f32 / doc.len() as f32;
        // Smoothed idf keeps terms present in every entry from vanishing.
        let idf = ((1.0 + n_docs as f32) / (1.0 + df as f32)).ln() + 1.0;
        vector[index] = tf * idf;
    }
    vector
}

/// Cosine similarity with a zero-norm guard.
#[must_use]
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
