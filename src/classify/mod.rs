//! Statement-to-work-process classification.
//!
//! Two interchangeable strategies sit behind [`SimilarityScorer`]: the
//! tf-idf cosine path and the lexical-overlap fallback. One policy function
//! picks between them per statement. The classifier never mutates the tree;
//! it returns a pure assignment plus fallback flags and a decision trace.

mod overlap;
mod tokens;
mod vectorize;

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::lexicon::Lexicon;
use crate::segment::DocumentTree;

pub use overlap::{keyword_set, OverlapScorer, MIN_KEYWORD_LEN};
pub use tokens::{content_tokens, fold, tokenize};
pub use vectorize::{cosine, TfidfScorer};

/// Minimum cosine similarity for the vector path to win.
pub const DEFAULT_ACCEPT_THRESHOLD: f32 = 0.2;

/// A text-similarity strategy over a statement and candidate descriptions.
///
/// Returns one score per candidate, or `None` when the strategy cannot
/// produce a usable ranking for this input.
pub trait SimilarityScorer {
    fn name(&self) -> &'static str;
    fn score(
        &self,
        statement: &str,
        candidates: &[&str],
        stopwords: &HashSet<String>,
    ) -> Option<Vec<f32>>;
}

/// The work process chosen for one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessAssignment {
    pub process: String,
    /// Cosine similarity when the vector path decided; `None` on fallback.
    pub score: Option<f32>,
    /// True when the lexical-overlap path decided, for downstream
    /// highlighting.
    pub fallback: bool,
}

/// Human-readable record of one classification decision.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTrace {
    pub core_task: String,
    pub statement: String,
    pub process: Option<String>,
    pub score: Option<f32>,
    pub fallback: bool,
}

impl std::fmt::Display for DecisionTrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.process, self.score) {
            (Some(p), Some(s)) => {
                write!(f, "[{}] {:?} -> {p} (score {s:.3})", self.core_task, self.statement)
            }
            (Some(p), None) => {
                write!(f, "[{}] {:?} -> {p} (fallback)", self.core_task, self.statement)
            }
            (None, _) => write!(
                f,
                "[{}] {:?} -> unassigned (no work processes)",
                self.core_task, self.statement
            ),
        }
    }
}

/// Pure classification output: assignments keyed by core task and statement
/// text, statements that could not be assigned, and the decision trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub by_task: BTreeMap<String, BTreeMap<String, ProcessAssignment>>,
    /// (core task, statement) pairs under tasks with zero work processes.
    pub unassigned: Vec<(String, String)>,
    pub trace: Vec<DecisionTrace>,
}

impl Classification {
    #[must_use]
    pub fn assignment_for(&self, task: &str, statement: &str) -> Option<&ProcessAssignment> {
        self.by_task.get(task).and_then(|m| m.get(statement))
    }

    #[must_use]
    pub fn fallback_count(&self) -> usize {
        self.by_task
            .values()
            .flat_map(BTreeMap::values)
            .filter(|a| a.fallback)
            .count()
    }
}

/// Classifies each statement of each core task against that task's work
/// processes, independently per task.
pub struct Classifier<'a> {
    lexicon: &'a Lexicon,
    threshold: f32,
    vector: TfidfScorer,
    fallback: OverlapScorer,
}

impl<'a> Classifier<'a> {
    #[must_use]
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self::with_threshold(lexicon, DEFAULT_ACCEPT_THRESHOLD)
    }

    #[must_use]
    pub fn with_threshold(lexicon: &'a Lexicon, threshold: f32) -> Self {
        Self {
            lexicon,
            threshold,
            vector: TfidfScorer,
            fallback: OverlapScorer,
        }
    }

    /// Assign every statement whose core task has at least one work process;
    /// statements under a task with none are reported as unassigned.
    #[must_use]
    pub fn classify(&self, tree: &DocumentTree) -> Classification {
        let mut result = Classification::default();

        for task in &tree.core_tasks {
            let processes = tree.work_processes_for(&task.code);
            let statements = tree.statements_for(&task.code);
            if statements.is_empty() {
                continue;
            }
            if processes.is_empty() {
                for stmt in statements {
                    result.trace.push(DecisionTrace {
                        core_task: task.code.clone(),
                        statement: stmt.text.clone(),
                        process: None,
                        score: None,
                        fallback: false,
                    });
                    result
                        .unassigned
                        .push((task.code.clone(), stmt.text.clone()));
                }
                continue;
            }

            let stopwords = self.task_stopwords(processes.iter().map(|wp| wp.code.as_str()));
            let descriptions: Vec<&str> =
                processes.iter().map(|wp| wp.description.as_str()).collect();

            let mut assignments = BTreeMap::new();
            for stmt in statements {
                let decision = self.choose(&stmt.text, &descriptions, &stopwords);
                let process = processes[decision.index].code.clone();
                debug!(
                    task = %task.code,
                    process = %process,
                    fallback = decision.fallback,
                    "classified statement"
                );
                result.trace.push(DecisionTrace {
                    core_task: task.code.clone(),
                    statement: stmt.text.clone(),
                    process: Some(process.clone()),
                    score: decision.score,
                    fallback: decision.fallback,
                });
                assignments.insert(
                    stmt.text.clone(),
                    ProcessAssignment {
                        process,
                        score: decision.score,
                        fallback: decision.fallback,
                    },
                );
            }
            result.by_task.insert(task.code.clone(), assignments);
        }

        result
    }

    /// Policy: vector path if it clears the threshold, then keyword overlap,
    /// then the largest keyword set as last resort. Ties always break toward
    /// the earliest-declared candidate.
    fn choose(&self, statement: &str, descriptions: &[&str], stopwords: &HashSet<String>) -> Choice {
        if let Some(sims) = self.vector.score(statement, descriptions, stopwords) {
            let index = argmax(&sims);
            if sims[index] > self.threshold {
                return Choice {
                    index,
                    score: Some(sims[index]),
                    fallback: false,
                };
            }
        }

        if let Some(overlaps) = self.fallback.score(statement, descriptions, stopwords) {
            let index = argmax(&overlaps);
            if overlaps[index] > 0.0 {
                return Choice {
                    index,
                    score: None,
                    fallback: true,
                };
            }
        }

        // All overlaps zero: pick the most informative description.
        #[allow(clippy::cast_precision_loss)]
        let sizes: Vec<f32> = descriptions
            .iter()
            .map(|d| keyword_set(d, stopwords).len() as f32)
            .collect();
        Choice {
            index: argmax(&sizes),
            score: None,
            fallback: true,
        }
    }

    /// Stopword set for one core task: the configured function words plus
    /// the task's work-process codes, with and without separators. Codes
    /// trivially co-occur with their own descriptions and would bias the
    /// match.
    fn task_stopwords<'c>(&self, codes: impl Iterator<Item = &'c str>) -> HashSet<String> {
        let mut stopwords = self.lexicon.stopwords.clone();
        for code in codes {
            let folded = fold(code);
            stopwords.insert(folded.chars().filter(|c| c.is_alphanumeric()).collect());
            for segment in tokenize(&folded) {
                stopwords.insert(segment);
            }
            stopwords.insert(folded);
        }
        stopwords
    }
}

struct Choice {
    index: usize,
    score: Option<f32>,
    fallback: bool,
}

/// Index of the maximum value; the first occurrence wins on ties.
fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}
