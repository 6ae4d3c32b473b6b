//! Terminal rendering of the matrix.
//!
//! The presentation collaborator's contract, minus interactivity: a plain
//! table with fallback-derived cells visually distinct (`x*`, colored when
//! the terminal supports it).

use colored::Colorize;

use crate::matrix::Matrix;

const STATEMENT_HEADER: &str = "Uitspraak";

/// Render the matrix as an aligned text table.
#[must_use]
pub fn render(matrix: &Matrix) -> String {
    let stmt_width = matrix
        .rows
        .iter()
        .map(|r| r.statement.chars().count())
        .chain(std::iter::once(STATEMENT_HEADER.len()))
        .max()
        .unwrap_or(0);
    let col_widths: Vec<usize> = matrix
        .columns
        .iter()
        .map(|c| c.chars().count().max(2))
        .collect();

    let mut out = String::new();

    out.push_str(&pad(STATEMENT_HEADER, stmt_width));
    for (code, width) in matrix.columns.iter().zip(&col_widths) {
        out.push_str("  ");
        out.push_str(&pad(code, *width));
    }
    out.push('\n');

    for row in &matrix.rows {
        out.push_str(&pad(&row.statement, stmt_width));
        for (cell, width) in row.cells.iter().zip(&col_widths) {
            out.push_str("  ");
            let marker = match (cell.set, cell.via_fallback) {
                (true, true) => pad("x*", *width).yellow().to_string(),
                (true, false) => pad("x", *width).green().to_string(),
                (false, _) => pad("", *width),
            };
            out.push_str(&marker);
        }
        out.push('\n');
    }

    if matrix
        .rows
        .iter()
        .any(|r| r.cells.iter().any(|c| c.via_fallback))
    {
        out.push('\n');
        out.push_str("x* = toegewezen via trefwoord-overlap (controle aanbevolen)\n");
    }

    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    padded
}
