//! The incidence matrix: one row per unique statement, one boolean column
//! per core-task code and per work-process code.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::classify::Classification;
use crate::segment::DocumentTree;

/// One cell of the matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCell {
    /// The statement belongs to this column's task, or was assigned to this
    /// column's work process.
    pub set: bool,
    /// The assignment came from the lexical-overlap fallback; usable for
    /// visual distinction.
    pub via_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub statement: String,
    pub cells: Vec<MatrixCell>,
}

/// Statement-by-task/process incidence matrix. Rows are globally
/// deduplicated and sorted alphabetically for display stability; columns
/// with zero true cells are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    /// Task and work-process codes, tasks in declaration order, each
    /// followed by its processes in declaration order.
    pub columns: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

impl Matrix {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, code: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == code)
    }
}

/// Build the matrix from the recovered tree and the classifier's assignment.
#[must_use]
pub fn build(tree: &DocumentTree, classification: &Classification) -> Matrix {
    let mut columns = Vec::new();
    for task in &tree.core_tasks {
        columns.push(task.code.clone());
        for wp in tree.work_processes_for(&task.code) {
            columns.push(wp.code.clone());
        }
    }

    // BTreeSet gives global dedup and the alphabetical row order in one go.
    let unique: BTreeSet<&str> = tree
        .statements
        .values()
        .flatten()
        .map(|s| s.text.as_str())
        .collect();

    let rows = unique
        .into_iter()
        .map(|text| {
            let mut cells = vec![MatrixCell::default(); columns.len()];
            for task in &tree.core_tasks {
                if !tree.statements_for(&task.code).iter().any(|s| s.text == text) {
                    continue;
                }
                if let Some(i) = columns.iter().position(|c| *c == task.code) {
                    cells[i].set = true;
                }
                if let Some(assignment) = classification.assignment_for(&task.code, text) {
                    if let Some(i) = columns.iter().position(|c| *c == assignment.process) {
                        cells[i].set = true;
                        cells[i].via_fallback = assignment.fallback;
                    }
                }
            }
            MatrixRow {
                statement: text.to_string(),
                cells,
            }
        })
        .collect();

    Matrix { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::lexicon::Lexicon;
    use crate::segment::{Section, Statement};

    fn sample_tree() -> DocumentTree {
        let mut tree = DocumentTree::default();
        tree.register_task("B1-K1", Section::Basis, 0);
        tree.register_work_process("B1-K1", "B1-K1-W1");
        tree.register_work_process("B1-K1", "B1-K1-W2");
        tree.append_description("B1-K1", "B1-K1-W1", "metselen van een muur");
        tree.append_description("B1-K1", "B1-K1-W2", "rapporteren aan de klant");
        tree.push_statement(
            "B1-K1",
            Statement {
                text: "kan een muur metselen".to_string(),
                position: 3,
            },
        );
        tree.push_statement(
            "B1-K1",
            Statement {
                text: "heeft kennis van rapporteren".to_string(),
                position: 4,
            },
        );
        tree
    }

    #[test]
    fn test_columns_cover_tasks_and_processes() {
        let lexicon = Lexicon::default();
        let tree = sample_tree();
        let matrix = build(&tree, &Classifier::new(&lexicon).classify(&tree));
        assert_eq!(matrix.columns, vec!["B1-K1", "B1-K1-W1", "B1-K1-W2"]);
    }

    #[test]
    fn test_rows_sorted_alphabetically() {
        let lexicon = Lexicon::default();
        let tree = sample_tree();
        let matrix = build(&tree, &Classifier::new(&lexicon).classify(&tree));
        let statements: Vec<_> = matrix.rows.iter().map(|r| r.statement.as_str()).collect();
        assert_eq!(
            statements,
            vec!["heeft kennis van rapporteren", "kan een muur metselen"]
        );
    }

    #[test]
    fn test_every_row_has_exactly_one_task_column() {
        let lexicon = Lexicon::default();
        let tree = sample_tree();
        let matrix = build(&tree, &Classifier::new(&lexicon).classify(&tree));
        let task_idx = matrix.column_index("B1-K1").unwrap();
        for row in &matrix.rows {
            assert!(row.cells[task_idx].set);
        }
    }

    #[test]
    fn test_at_most_one_process_column_per_row() {
        let lexicon = Lexicon::default();
        let tree = sample_tree();
        let matrix = build(&tree, &Classifier::new(&lexicon).classify(&tree));
        let w1 = matrix.column_index("B1-K1-W1").unwrap();
        let w2 = matrix.column_index("B1-K1-W2").unwrap();
        for row in &matrix.rows {
            assert!(u8::from(row.cells[w1].set) + u8::from(row.cells[w2].set) <= 1);
        }
    }

    #[test]
    fn test_empty_columns_are_kept() {
        let lexicon = Lexicon::default();
        let mut tree = sample_tree();
        tree.register_work_process("B1-K1", "B1-K1-W3");
        let matrix = build(&tree, &Classifier::new(&lexicon).classify(&tree));
        let w3 = matrix.column_index("B1-K1-W3").unwrap();
        assert!(matrix.rows.iter().all(|r| !r.cells[w3].set));
    }

    #[test]
    fn test_duplicate_statement_across_tasks_folds_into_one_row() {
        let lexicon = Lexicon::default();
        let mut tree = sample_tree();
        tree.register_task("P2-K1", Section::Profiel, 10);
        tree.push_statement(
            "P2-K1",
            Statement {
                text: "kan een muur metselen".to_string(),
                position: 12,
            },
        );
        let matrix = build(&tree, &Classifier::new(&lexicon).classify(&tree));
        let rows: Vec<_> = matrix
            .rows
            .iter()
            .filter(|r| r.statement == "kan een muur metselen")
            .collect();
        assert_eq!(rows.len(), 1);
        let b = matrix.column_index("B1-K1").unwrap();
        let p = matrix.column_index("P2-K1").unwrap();
        assert!(rows[0].cells[b].set);
        assert!(rows[0].cells[p].set);
    }
}
