//! Text-extraction collaborator boundary.
//!
//! The core never reads a source document itself: a [`PageSource`] hands it
//! zero or more page texts, already extracted. "No page produced any text"
//! is an [`KruistabelError::EmptyInput`] condition, distinct from "parsed
//! but found nothing".

use std::path::{Path, PathBuf};

use crate::error::{KruistabelError, Result};

/// Contract of the extraction collaborator: given a source document,
/// produce zero or more page texts in page order.
pub trait PageSource {
    fn pages(&self) -> Result<Vec<String>>;
}

/// Plain-text source: reads a UTF-8 file and splits pages on form feeds.
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    path: PathBuf,
}

impl PlainTextSource {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl PageSource for PlainTextSource {
    fn pages(&self) -> Result<Vec<String>> {
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(raw.split('\u{0c}').map(str::to_string).collect())
    }
}

/// Concatenate page texts with newline separators, skipping empty pages.
///
/// # Errors
///
/// [`KruistabelError::EmptyInput`] when no page produced usable text.
pub fn flatten_pages(pages: &[String]) -> Result<String> {
    let non_empty: Vec<&str> = pages
        .iter()
        .map(|p| p.as_str())
        .filter(|p| !p.trim().is_empty())
        .collect();
    if non_empty.is_empty() {
        return Err(KruistabelError::EmptyInput);
    }
    Ok(non_empty.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_joins_pages() {
        let pages = vec!["eerste pagina".to_string(), "tweede pagina".to_string()];
        assert_eq!(flatten_pages(&pages).unwrap(), "eerste pagina\ntweede pagina");
    }

    #[test]
    fn test_flatten_skips_blank_pages() {
        let pages = vec!["tekst".to_string(), "   ".to_string(), String::new()];
        assert_eq!(flatten_pages(&pages).unwrap(), "tekst");
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let pages = vec!["  ".to_string(), String::new()];
        assert!(matches!(
            flatten_pages(&pages),
            Err(KruistabelError::EmptyInput)
        ));
        assert!(matches!(flatten_pages(&[]), Err(KruistabelError::EmptyInput)));
    }

    #[test]
    fn test_plain_text_source_splits_on_form_feed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dossier.txt");
        std::fs::write(&path, "pagina een\u{0c}pagina twee").unwrap();
        let pages = PlainTextSource::new(&path).pages().unwrap();
        assert_eq!(pages, vec!["pagina een", "pagina twee"]);
    }
}
