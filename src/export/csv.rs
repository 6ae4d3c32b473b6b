//! CSV serialization (RFC-4180 style quoting).
//!
//! Set cells are written as `x`, fallback-derived assignments as `x*`, so
//! reviewer attention survives the round trip into a spreadsheet.

use std::io::Write;

use crate::error::Result;
use crate::matrix::Matrix;

use super::TabularExport;

#[derive(Debug, Default)]
pub struct CsvExport;

impl TabularExport for CsvExport {
    fn write(&self, matrix: &Matrix, out: &mut dyn Write) -> Result<()> {
        let mut header = vec!["Uitspraak".to_string()];
        header.extend(matrix.columns.iter().cloned());
        write_record(out, &header)?;

        for row in &matrix.rows {
            let mut record = vec![row.statement.clone()];
            for cell in &row.cells {
                record.push(match (cell.set, cell.via_fallback) {
                    (true, true) => "x*".to_string(),
                    (true, false) => "x".to_string(),
                    (false, _) => String::new(),
                });
            }
            write_record(out, &record)?;
        }
        Ok(())
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}

fn write_record(out: &mut dyn Write, fields: &[String]) -> Result<()> {
    let line = fields.iter().map(|f| quote(f)).collect::<Vec<_>>().join(",");
    writeln!(out, "{line}")?;
    Ok(())
}

fn quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::to_string;
    use crate::matrix::{MatrixCell, MatrixRow};

    fn sample_matrix() -> Matrix {
        Matrix {
            columns: vec!["B1-K1".to_string(), "B1-K1-W1".to_string()],
            rows: vec![MatrixRow {
                statement: "kan een muur metselen".to_string(),
                cells: vec![
                    MatrixCell {
                        set: true,
                        via_fallback: false,
                    },
                    MatrixCell {
                        set: true,
                        via_fallback: true,
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_csv_layout() {
        let csv = to_string(&CsvExport, &sample_matrix()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "Uitspraak,B1-K1,B1-K1-W1");
        assert_eq!(lines.next().unwrap(), "kan een muur metselen,x,x*");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_quoting() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote("met, komma"), "\"met, komma\"");
        assert_eq!(quote("met \"quote\""), "\"met \"\"quote\"\"\"");
    }
}
