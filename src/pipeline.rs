//! Pipeline orchestration: Lexicon -> Segmenter -> Classifier -> Matrix
//! Builder, strictly forward, one document per run.
//!
//! The run is synchronous and owns no shared mutable state; concurrent runs
//! may share a read-only [`Lexicon`].

use tracing::{info, warn};

use crate::classify::{Classification, Classifier};
use crate::config::Config;
use crate::error::Result;
use crate::lexicon::Lexicon;
use crate::matrix::{self, Matrix};
use crate::segment::{self, DocumentTree, FlushEvent, ParseCondition};

/// Everything one pipeline run produced, including the observability trail.
#[derive(Debug)]
pub struct PipelineReport {
    pub tree: DocumentTree,
    pub classification: Classification,
    pub matrix: Matrix,
    pub condition: ParseCondition,
    pub flush_trace: Vec<FlushEvent>,
}

/// Run the full pipeline over flattened document text.
///
/// Degrades instead of failing: malformed text yields a smaller tree and a
/// correspondingly smaller matrix, with the condition and traces explaining
/// why. The only fallible part is compiling configured patterns.
pub fn run(text: &str, config: &Config) -> Result<PipelineReport> {
    let lexicon = Lexicon::from_config(&config.lexicon)?;
    run_with_lexicon(text, &lexicon, config.classify.threshold)
}

/// Variant for callers that built (and possibly share) a lexicon already.
pub fn run_with_lexicon(text: &str, lexicon: &Lexicon, threshold: f32) -> Result<PipelineReport> {
    let outcome = segment::segment(text, lexicon);
    let condition = outcome.tree.condition();
    match condition {
        ParseCondition::NoStructureFound => {
            warn!("no core-task codes matched; returning an empty tree");
        }
        ParseCondition::NoStatementsFound => {
            warn!("core tasks found but no statement survived filtering");
        }
        ParseCondition::Ok => {}
    }

    let classification = Classifier::with_threshold(lexicon, threshold).classify(&outcome.tree);
    let matrix = matrix::build(&outcome.tree, &classification);
    info!(
        tasks = outcome.tree.core_tasks.len(),
        statements = outcome.tree.statement_count(),
        fallback = classification.fallback_count(),
        "pipeline complete"
    );

    Ok(PipelineReport {
        tree: outcome.tree,
        classification,
        matrix,
        condition,
        flush_trace: outcome.trace,
    })
}
