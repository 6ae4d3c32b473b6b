//! kruistabel - cross-table generator for kwalificatiedossier text.
//!
//! Converts the flattened text of a vocational-qualification document into a
//! hierarchical record (sections, core tasks, work processes, competency
//! statements) and classifies each statement against the work processes of
//! its core task, producing a statement-by-task/process incidence matrix.
//!
//! # Pipeline
//!
//! Data flows strictly forward:
//!
//! ```text
//! Lexicon -> Segmenter -> Classifier -> Matrix Builder
//! ```
//!
//! The [`pipeline`] module wires the stages together; each stage is also
//! usable on its own.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod lexicon;
pub mod matrix;
pub mod output;
pub mod pipeline;
pub mod segment;

pub use error::{KruistabelError, Result};
pub use lexicon::Lexicon;
pub use matrix::Matrix;
pub use segment::{DocumentTree, ParseCondition};
