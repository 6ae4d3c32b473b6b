//! Joins wrapped lines into single statements and deduplicates them per
//! owning core task.
//!
//! Extracted text loses all layout, so a statement can wrap across any
//! number of lines. The accumulator collects candidate lines between lead
//! verbs and commits a statement only if, after cleanup, it still starts
//! with a lead verb, is non-empty, and was not seen before under the same
//! core task.

use std::collections::{HashMap, HashSet};

use crate::lexicon::Lexicon;
use crate::segment::types::Statement;

#[derive(Debug, Default)]
pub struct StatementAccumulator {
    pending: Vec<String>,
    start_line: usize,
    /// Committed statement texts per core-task code, for exact-match dedup.
    seen: HashMap<String, HashSet<String>>,
}

impl StatementAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Start a new pending statement with this line.
    pub fn begin(&mut self, line: &str, line_no: usize) {
        self.pending.clear();
        self.pending.push(line.to_string());
        self.start_line = line_no;
    }

    /// Append a continuation line to the pending statement.
    pub fn append(&mut self, line: &str) {
        self.pending.push(line.to_string());
    }

    /// Drop the pending statement without committing it.
    pub fn discard(&mut self) {
        self.pending.clear();
    }

    /// Commit the pending statement under `task`, applying cleanup and the
    /// lead-verb recheck. Returns `None` when the statement is filtered out
    /// (empty after cleanup, no lead verb, or a duplicate for this task).
    pub fn commit(&mut self, task: &str, lexicon: &Lexicon) -> Option<Statement> {
        if self.pending.is_empty() {
            return None;
        }
        let joined = self.pending.join(" ");
        self.pending.clear();

        let text = lexicon.clean_statement(&joined);
        if text.is_empty() || !lexicon.starts_with_lead_verb(&text) {
            return None;
        }
        let seen = self.seen.entry(task.to_string()).or_default();
        if !seen.insert(text.clone()) {
            return None;
        }
        Some(Statement {
            text,
            position: self.start_line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_joins_wrapped_lines() {
        let lexicon = Lexicon::default();
        let mut acc = StatementAccumulator::new();
        acc.begin("kan een plan", 4);
        acc.append("opstellen voor het werk");
        let stmt = acc.commit("B1-K1", &lexicon).unwrap();
        assert_eq!(stmt.text, "kan een plan opstellen voor het werk");
        assert_eq!(stmt.position, 4);
    }

    #[test]
    fn test_commit_rejects_non_verb_start() {
        let lexicon = Lexicon::default();
        let mut acc = StatementAccumulator::new();
        acc.begin("overige opmerkingen", 0);
        assert!(acc.commit("B1-K1", &lexicon).is_none());
        assert!(!acc.is_pending());
    }

    #[test]
    fn test_commit_deduplicates_per_task() {
        let lexicon = Lexicon::default();
        let mut acc = StatementAccumulator::new();
        acc.begin("kent de normen", 1);
        assert!(acc.commit("B1-K1", &lexicon).is_some());
        acc.begin("kent de normen", 9);
        assert!(acc.commit("B1-K1", &lexicon).is_none());
        // same text under another task is fine
        acc.begin("kent de normen", 20);
        assert!(acc.commit("B1-K2", &lexicon).is_some());
    }

    #[test]
    fn test_commit_applies_cleanup_before_recheck() {
        let lexicon = Lexicon::default();
        let mut acc = StatementAccumulator::new();
        acc.begin("heeft kennis van beton", 2);
        acc.append("Pagina 3 van 12");
        let stmt = acc.commit("B1-K1", &lexicon).unwrap();
        assert_eq!(stmt.text, "heeft kennis van beton");
    }

    #[test]
    fn test_empty_pending_commits_nothing() {
        let lexicon = Lexicon::default();
        let mut acc = StatementAccumulator::new();
        assert!(acc.commit("B1-K1", &lexicon).is_none());
    }
}
