//! The configured vocabulary driving segmentation and classification.
//!
//! A [`Lexicon`] is pure data: code patterns, heading phrases, lead verbs,
//! stopwords, and the cleanup pattern for page furniture. It is built once
//! from the [`crate::config::LexiconConfig`] and never mutated during a run,
//! so concurrent pipeline runs can share one instance.

use std::collections::HashSet;

use regex::Regex;

use crate::config::LexiconConfig;
use crate::error::{KruistabelError, Result};
use crate::segment::Section;

/// Characters stripped from the front of knowledge-block lines before the
/// lead-verb check (bullets survive text extraction in many variants).
const BULLET_MARKERS: &[char] = &['-', '\u{2022}', '*', '\u{2013}', '\u{00b7}', '\u{25cf}'];

/// Configured vocabulary: patterns, phrases, verbs, stopwords.
#[derive(Debug)]
pub struct Lexicon {
    /// Core-task codes, e.g. `B1-K1` or `P2-K1`.
    pub core_task: Regex,
    /// Work-process codes, e.g. `B1-K1-W3`.
    pub work_process: Regex,
    /// Section-boundary keywords mapped to the section they open.
    pub section_keywords: Vec<(String, Section)>,
    /// Heading phrase opening a knowledge block.
    pub knowledge_heading: String,
    /// Heading phrase opening a work-process block.
    pub work_process_heading: String,
    /// Phrase re-opening the knowledge block for supplemental statements
    /// ("Voor Allround ... geldt aanvullend:").
    pub supplement_phrase: String,
    /// Keywords terminating the current block.
    pub block_terminators: Vec<String>,
    /// Sub-headings inside a block ("Omschrijving"); they end pending text
    /// but leave the block open.
    pub subheadings: Vec<String>,
    /// Verbs a competency statement starts with.
    pub lead_verbs: Vec<String>,
    /// Generic function words excluded from classification signal.
    pub stopwords: HashSet<String>,
    /// Trailing page-furniture fragments stripped from committed statements.
    pub page_furniture: Regex,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::from_config(&LexiconConfig::default())
            .unwrap_or_else(|e| panic!("default lexicon patterns must compile: {e}"))
    }
}

impl Lexicon {
    /// Build a lexicon from configuration, compiling the configured patterns.
    pub fn from_config(cfg: &LexiconConfig) -> Result<Self> {
        let core_task = compile("core-task", &cfg.core_task_pattern)?;
        let work_process = compile("work-process", &cfg.work_process_pattern)?;
        let page_furniture = compile("page-furniture", &cfg.page_furniture_pattern)?;

        let section_keywords = vec![
            (cfg.basis_keyword.clone(), Section::Basis),
            (cfg.profiel_keyword.clone(), Section::Profiel),
        ];

        let mut stopwords: HashSet<String> =
            cfg.stopwords.iter().map(|w| w.to_lowercase()).collect();
        stopwords.extend(cfg.extra_stopwords.iter().map(|w| w.to_lowercase()));

        Ok(Self {
            core_task,
            work_process,
            section_keywords,
            knowledge_heading: cfg.knowledge_heading.clone(),
            work_process_heading: cfg.work_process_heading.clone(),
            supplement_phrase: cfg.supplement_phrase.clone(),
            block_terminators: cfg.block_terminators.clone(),
            subheadings: cfg.subheadings.clone(),
            lead_verbs: cfg.lead_verbs.clone(),
            stopwords,
            page_furniture,
        })
    }

    /// Section opened by this line, if it is a section-boundary line.
    #[must_use]
    pub fn section_of(&self, line: &str) -> Option<Section> {
        self.section_keywords
            .iter()
            .find(|(kw, _)| line.contains(kw.as_str()))
            .map(|(_, s)| *s)
    }

    /// Core-task code declared on this line. Lines carrying a work-process
    /// code embed a core-task code too, so those do not count.
    #[must_use]
    pub fn core_task_declaration(&self, line: &str) -> Option<String> {
        if self.work_process.is_match(line) {
            return None;
        }
        self.core_task.find(line).map(|m| m.as_str().to_string())
    }

    /// Work-process code declared on this line.
    #[must_use]
    pub fn work_process_declaration(&self, line: &str) -> Option<String> {
        self.work_process.find(line).map(|m| m.as_str().to_string())
    }

    #[must_use]
    pub fn is_knowledge_heading(&self, line: &str) -> bool {
        line.contains(self.knowledge_heading.as_str())
    }

    #[must_use]
    pub fn is_work_process_heading(&self, line: &str) -> bool {
        line.contains(self.work_process_heading.as_str())
    }

    #[must_use]
    pub fn is_supplement(&self, line: &str) -> bool {
        line.contains(self.supplement_phrase.as_str())
    }

    #[must_use]
    pub fn is_block_terminator(&self, line: &str) -> bool {
        self.block_terminators
            .iter()
            .any(|kw| line.contains(kw.as_str()))
    }

    #[must_use]
    pub fn is_subheading(&self, line: &str) -> bool {
        self.subheadings.iter().any(|kw| line.contains(kw.as_str()))
    }

    /// Strip leading bullet markers and whitespace.
    #[must_use]
    pub fn strip_bullets<'a>(&self, line: &'a str) -> &'a str {
        line.trim_start_matches(|c: char| BULLET_MARKERS.contains(&c) || c.is_whitespace())
    }

    /// True if the text starts with a configured lead verb followed by a
    /// word boundary. Comparison is case-insensitive.
    #[must_use]
    pub fn starts_with_lead_verb(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.lead_verbs.iter().any(|verb| {
            let verb = verb.to_lowercase();
            match lower.strip_prefix(verb.as_str()) {
                Some(rest) => rest.is_empty() || rest.starts_with(|c: char| !c.is_alphanumeric()),
                None => false,
            }
        })
    }

    /// Cleanup applied to a committed statement: strip trailing page
    /// furniture, then trim whitespace.
    #[must_use]
    pub fn clean_statement(&self, text: &str) -> String {
        self.page_furniture.replace(text, "").trim().to_string()
    }

    #[must_use]
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| KruistabelError::Pattern { name, source })
}
