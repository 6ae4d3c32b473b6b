//! JSON serialization, carrying the structured fallback flags.

use std::io::Write;

use crate::error::{KruistabelError, Result};
use crate::matrix::Matrix;

use super::TabularExport;

#[derive(Debug, Default)]
pub struct JsonExport;

impl TabularExport for JsonExport {
    fn write(&self, matrix: &Matrix, out: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, matrix)
            .map_err(|e| KruistabelError::Export(format!("json: {e}")))?;
        writeln!(out)?;
        Ok(())
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
