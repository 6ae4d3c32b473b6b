//! Line-priority state machine recovering document structure.
//!
//! The segmenter is an explicit parser object advanced one line at a time by
//! [`Segmenter::step`], which classifies the line against a fixed priority
//! order (first match wins) and returns the transition it took. Malformed
//! input never raises: every line either matches a known shape or falls
//! through to append/ignore.

use tracing::{debug, trace};

use crate::lexicon::Lexicon;
use crate::segment::accumulator::StatementAccumulator;
use crate::segment::types::{DocumentTree, Section};

/// Transition taken for a single input line, in the priority order the
/// rules are evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateTransition {
    SectionChanged(Section),
    TaskDeclared { code: String, fresh: bool },
    KnowledgeBlockOpened { task: String },
    WorkProcessBlockOpened { task: String },
    SupplementOpened { task: String },
    WorkProcessDeclared { code: String },
    BlockTerminated,
    SubheadingCrossed,
    StatementStarted,
    StatementContinued,
    DescriptionAppended,
    Ignored,
}

/// Why text was flushed out of the pending buffers, for diagnosing why a
/// document under-produced results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushKind {
    StatementCommitted,
    StatementDiscarded,
    DescriptionFlushed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushEvent {
    /// Line index the flush happened at (0-based).
    pub line: usize,
    pub kind: FlushKind,
    pub detail: String,
}

impl std::fmt::Display for FlushEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            FlushKind::StatementCommitted => "statement",
            FlushKind::StatementDiscarded => "discarded",
            FlushKind::DescriptionFlushed => "description",
        };
        write!(f, "line {:>4}  {:<11}  {}", self.line, kind, self.detail)
    }
}

/// Result of a full forward pass: the recovered tree plus the flush trace.
#[derive(Debug, Clone, Default)]
pub struct SegmentOutcome {
    pub tree: DocumentTree,
    pub trace: Vec<FlushEvent>,
}

/// Segment flattened document text into a [`DocumentTree`].
///
/// Never raises on malformed input; callers distinguish "nothing matched"
/// from "no statements survived" via [`DocumentTree::condition`].
#[must_use]
pub fn segment(text: &str, lexicon: &Lexicon) -> SegmentOutcome {
    let mut parser = Segmenter::new(lexicon);
    for line in text.lines() {
        parser.step(line);
    }
    parser.finish()
}

/// The state machine itself. One instance per document scan.
pub struct Segmenter<'a> {
    lexicon: &'a Lexicon,
    tree: DocumentTree,
    section: Section,
    current_task: Option<String>,
    current_process: Option<String>,
    in_knowledge: bool,
    in_process_block: bool,
    pending_description: String,
    accumulator: StatementAccumulator,
    line_no: usize,
    trace: Vec<FlushEvent>,
}

impl<'a> Segmenter<'a> {
    #[must_use]
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self {
            lexicon,
            tree: DocumentTree::default(),
            section: Section::None,
            current_task: None,
            current_process: None,
            in_knowledge: false,
            in_process_block: false,
            pending_description: String::new(),
            accumulator: StatementAccumulator::new(),
            line_no: 0,
            trace: Vec::new(),
        }
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub fn current_task(&self) -> Option<&str> {
        self.current_task.as_deref()
    }

    /// Advance the machine by one line and return the transition taken.
    pub fn step(&mut self, raw_line: &str) -> StateTransition {
        let line = raw_line.trim();
        let transition = self.classify_line(line);
        trace!(line = self.line_no, ?transition, "step");
        self.line_no += 1;
        transition
    }

    /// Flush still-pending buffers and hand back the result.
    #[must_use]
    pub fn finish(mut self) -> SegmentOutcome {
        self.flush_statement();
        self.flush_description();
        debug!(
            tasks = self.tree.core_tasks.len(),
            statements = self.tree.statement_count(),
            "segmentation finished"
        );
        SegmentOutcome {
            tree: self.tree,
            trace: self.trace,
        }
    }

    fn classify_line(&mut self, line: &str) -> StateTransition {
        // 1. Section boundary: updates the section, touches nothing else.
        if let Some(section) = self.lexicon.section_of(line) {
            self.section = section;
            return StateTransition::SectionChanged(section);
        }

        // 2. Core-task declaration. Trailing descriptive text on the heading
        // line is discarded.
        if let Some(code) = self.lexicon.core_task_declaration(line) {
            self.flush_statement();
            self.flush_description();
            let fresh = self.tree.register_task(&code, self.section, self.line_no);
            self.current_task = Some(code.clone());
            self.current_process = None;
            self.in_knowledge = false;
            self.in_process_block = false;
            return StateTransition::TaskDeclared { code, fresh };
        }

        // 3. Knowledge-block heading: rebind to the nearest preceding core
        // task in the current section, since the heading can be physically
        // separated from its task's declaration line.
        if self.lexicon.is_knowledge_heading(line) {
            self.flush_statement();
            self.flush_description();
            return match self.resolve_owner() {
                Some(task) => {
                    self.current_task = Some(task.clone());
                    self.current_process = None;
                    self.in_knowledge = true;
                    self.in_process_block = false;
                    StateTransition::KnowledgeBlockOpened { task }
                }
                None => StateTransition::Ignored,
            };
        }

        // 4. Work-process-block heading: same rebinding rule.
        if self.lexicon.is_work_process_heading(line) {
            self.flush_statement();
            self.flush_description();
            return match self.resolve_owner() {
                Some(task) => {
                    self.current_task = Some(task.clone());
                    self.current_process = None;
                    self.in_process_block = true;
                    self.in_knowledge = false;
                    StateTransition::WorkProcessBlockOpened { task }
                }
                None => StateTransition::Ignored,
            };
        }

        // Supplemental block ("... geldt aanvullend:") re-opens the knowledge
        // block for the current task.
        if self.lexicon.is_supplement(line) {
            if let Some(task) = self.current_task.clone() {
                self.flush_statement();
                self.in_knowledge = true;
                self.in_process_block = false;
                return StateTransition::SupplementOpened { task };
            }
            return StateTransition::Ignored;
        }

        // 5. Work-process declaration, only meaningful inside a block.
        if self.in_process_block {
            if let Some(code) = self.lexicon.work_process_declaration(line) {
                self.flush_description();
                return match self.current_task.clone() {
                    Some(task) => {
                        self.tree.register_work_process(&task, &code);
                        self.current_process = Some(code.clone());
                        StateTransition::WorkProcessDeclared { code }
                    }
                    None => StateTransition::Ignored,
                };
            }
        }

        // Sub-heading ("Omschrijving"): ends whatever text is pending but
        // leaves the block open, since it introduces the text that follows.
        if self.lexicon.is_subheading(line) {
            self.flush_statement();
            self.flush_description();
            return StateTransition::SubheadingCrossed;
        }

        // 6. Block terminator.
        if self.lexicon.is_block_terminator(line) {
            self.flush_statement();
            self.flush_description();
            self.in_knowledge = false;
            self.in_process_block = false;
            self.current_process = None;
            return StateTransition::BlockTerminated;
        }

        // 7. Inside a knowledge block: start or continue a statement.
        if self.in_knowledge {
            let normalized = self.lexicon.strip_bullets(line).trim();
            if normalized.is_empty() {
                return StateTransition::Ignored;
            }
            if self.lexicon.starts_with_lead_verb(normalized) {
                self.flush_statement();
                self.accumulator.begin(normalized, self.line_no);
                return StateTransition::StatementStarted;
            }
            if self.accumulator.is_pending() {
                self.accumulator.append(normalized);
                return StateTransition::StatementContinued;
            }
            return StateTransition::Ignored;
        }

        // 8. Inside a work-process block: accumulate description text.
        if self.in_process_block && self.current_process.is_some() && !line.is_empty() {
            if !self.pending_description.is_empty() {
                self.pending_description.push(' ');
            }
            self.pending_description.push_str(line);
            return StateTransition::DescriptionAppended;
        }

        StateTransition::Ignored
    }

    /// Nearest preceding core task declared in the current section. Falls
    /// back to the most recently declared task when the section has none.
    fn resolve_owner(&self) -> Option<String> {
        self.tree
            .core_tasks
            .iter()
            .rev()
            .find(|t| t.section == self.section)
            .or_else(|| self.tree.core_tasks.last())
            .map(|t| t.code.clone())
    }

    fn flush_statement(&mut self) {
        if !self.accumulator.is_pending() {
            return;
        }
        let Some(task) = self.current_task.clone() else {
            // A statement with no owning core task is discarded, never stored.
            self.accumulator.discard();
            self.record(FlushKind::StatementDiscarded, "no owning core task");
            return;
        };
        match self.accumulator.commit(&task, self.lexicon) {
            Some(statement) => {
                debug!(task = %task, text = %statement.text, "statement committed");
                self.record(
                    FlushKind::StatementCommitted,
                    format!("[{task}] {}", statement.text),
                );
                self.tree.push_statement(&task, statement);
            }
            None => {
                self.record(FlushKind::StatementDiscarded, format!("[{task}] filtered"));
            }
        }
    }

    fn flush_description(&mut self) {
        if self.pending_description.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_description);
        if let (Some(task), Some(code)) = (self.current_task.clone(), self.current_process.clone())
        {
            debug!(process = %code, chars = text.len(), "description flushed");
            self.tree.append_description(&task, &code, &text);
            self.record(FlushKind::DescriptionFlushed, format!("[{code}] {text}"));
        }
    }

    fn record(&mut self, kind: FlushKind, detail: impl Into<String>) {
        self.trace.push(FlushEvent {
            line: self.line_no,
            kind,
            detail: detail.into(),
        });
    }
}
