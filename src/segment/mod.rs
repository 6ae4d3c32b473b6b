//! Segmentation: a single forward pass over the flattened document text
//! recovering sections, core tasks, work processes, and multi-line
//! competency statements.
//!
//! The heavy lifting happens in [`parser`]; [`accumulator`] owns the
//! wrapped-line joining and per-task dedup rules.

mod accumulator;
mod parser;
mod types;

pub use accumulator::StatementAccumulator;
pub use parser::{segment, FlushEvent, FlushKind, SegmentOutcome, Segmenter, StateTransition};
pub use types::{CoreTask, DocumentTree, ParseCondition, Section, Statement, WorkProcess};
