//! Crate-wide error type.
//!
//! Only [`KruistabelError::EmptyInput`] is a hard stop: a document that
//! produced no text at all cannot yield a matrix. Every other condition the
//! pipeline can hit degrades to smaller output plus a trace entry instead of
//! an error (see `segment::ParseCondition`).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, KruistabelError>;

#[derive(Debug, Error)]
pub enum KruistabelError {
    /// The extraction collaborator produced no usable text for the document.
    #[error("no usable text extracted from the source document")]
    EmptyInput,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    /// A configured pattern failed to compile.
    #[error("invalid {name} pattern: {source}")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("export error: {0}")]
    Export(String),
}
