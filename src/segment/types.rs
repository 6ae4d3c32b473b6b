//! Entities recovered from the document text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Part of the dossier the scanner is currently in.
///
/// Mutated only by the segmenter when a section-boundary keyword is seen;
/// used to bind later heading blocks to the right core task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Before any section heading was seen.
    #[default]
    None,
    /// "Basisdeel" - the basic part shared by all profiles.
    Basis,
    /// "Profieldeel" - the profile-specific part.
    Profiel,
}

impl Section {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basis => "basisdeel",
            Self::Profiel => "profieldeel",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Top-level competency unit, identified by its code (e.g. `B1-K1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreTask {
    pub code: String,
    /// Section the task was declared in.
    pub section: Section,
    /// Line index of the declaration (0-based).
    pub position: usize,
}

/// Sub-unit of a core task (e.g. `B1-K1-W2`) with its accumulated
/// free-text description, used as classification signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkProcess {
    pub code: String,
    /// Code of the owning core task.
    pub core_task: String,
    /// Description text accumulated while inside this process's block.
    pub description: String,
}

/// A single competency assertion, committed after cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub text: String,
    /// Line index the statement started on (0-based).
    pub position: usize,
}

/// Caller-visible outcome of a full parse. Neither variant below `Ok` is an
/// error: the tree is simply smaller than expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseCondition {
    Ok,
    /// Text was present but no core-task code matched.
    NoStructureFound,
    /// Core tasks were found but no statement survived filtering.
    NoStatementsFound,
}

/// Structured result of segmentation: core tasks in declaration order, work
/// processes and statements keyed by owning core-task code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentTree {
    pub core_tasks: Vec<CoreTask>,
    pub work_processes: BTreeMap<String, Vec<WorkProcess>>,
    pub statements: BTreeMap<String, Vec<Statement>>,
}

impl DocumentTree {
    /// Register a core task. Idempotent: a second heading with the same code
    /// does not create a duplicate.
    pub fn register_task(&mut self, code: &str, section: Section, position: usize) -> bool {
        if self.core_tasks.iter().any(|t| t.code == code) {
            return false;
        }
        self.core_tasks.push(CoreTask {
            code: code.to_string(),
            section,
            position,
        });
        true
    }

    /// Register a work process under its core task. Idempotent by code.
    pub fn register_work_process(&mut self, task: &str, code: &str) -> bool {
        let entry = self.work_processes.entry(task.to_string()).or_default();
        if entry.iter().any(|wp| wp.code == code) {
            return false;
        }
        entry.push(WorkProcess {
            code: code.to_string(),
            core_task: task.to_string(),
            description: String::new(),
        });
        true
    }

    /// Append flushed description text to a work process.
    pub fn append_description(&mut self, task: &str, code: &str, text: &str) {
        if let Some(wp) = self
            .work_processes
            .get_mut(task)
            .and_then(|v| v.iter_mut().find(|wp| wp.code == code))
        {
            if !wp.description.is_empty() {
                wp.description.push(' ');
            }
            wp.description.push_str(text);
        }
    }

    pub fn push_statement(&mut self, task: &str, statement: Statement) {
        self.statements.entry(task.to_string()).or_default().push(statement);
    }

    #[must_use]
    pub fn work_processes_for(&self, task: &str) -> &[WorkProcess] {
        self.work_processes.get(task).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn statements_for(&self, task: &str) -> &[Statement] {
        self.statements.get(task).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn statement_count(&self) -> usize {
        self.statements.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn condition(&self) -> ParseCondition {
        if self.core_tasks.is_empty() {
            ParseCondition::NoStructureFound
        } else if self.statement_count() == 0 {
            ParseCondition::NoStatementsFound
        } else {
            ParseCondition::Ok
        }
    }
}
