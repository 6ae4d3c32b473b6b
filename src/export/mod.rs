//! Export collaborator: serialize the matrix to a tabular file format.

mod csv;
mod json;

use std::io::Write;

use crate::error::Result;
use crate::matrix::Matrix;

pub use csv::CsvExport;
pub use json::JsonExport;

/// Contract of the export collaborator: serialize a table of
/// string/boolean cells to a writable destination.
pub trait TabularExport {
    fn write(&self, matrix: &Matrix, out: &mut dyn Write) -> Result<()>;

    /// Conventional file extension for this format.
    fn extension(&self) -> &'static str;
}

/// Serialize to an in-memory string, mainly for tests and stdout output.
pub fn to_string(exporter: &dyn TabularExport, matrix: &Matrix) -> Result<String> {
    let mut buf = Vec::new();
    exporter.write(matrix, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| crate::error::KruistabelError::Export(format!("invalid utf-8: {e}")))
}
