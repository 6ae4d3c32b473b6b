//! Configuration: defaults, optional TOML patch, env overrides.
//!
//! The defaults reproduce the vocabulary of the kwalificatiedossier model
//! documents; a TOML file (via `--config` or `KRUISTABEL_CONFIG`) patches
//! individual fields without restating the rest.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KruistabelError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub classify: ClassifyConfig,
}

impl Config {
    /// Load defaults, apply the TOML patch (explicit path or
    /// `KRUISTABEL_CONFIG`), then env overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path.map(std::path::PathBuf::from).or_else(|| {
            std::env::var("KRUISTABEL_CONFIG")
                .ok()
                .map(std::path::PathBuf::from)
        });
        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        }

        config.apply_env_overrides()?;
        Ok(config)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path).map_err(|err| {
            KruistabelError::Config(format!("read config {}: {err}", path.display()))
        })?;
        let patch = toml::from_str(&raw).map_err(|err| {
            KruistabelError::Config(format!("parse config {}: {err}", path.display()))
        })?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.lexicon {
            self.lexicon.merge(patch);
        }
        if let Some(patch) = patch.classify {
            self.classify.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var("KRUISTABEL_THRESHOLD") {
            self.classify.threshold = raw.parse().map_err(|_| {
                KruistabelError::Config(format!("KRUISTABEL_THRESHOLD: not a number: {raw}"))
            })?;
        }
        if let Ok(raw) = std::env::var("KRUISTABEL_LEAD_VERBS") {
            self.lexicon.lead_verbs = split_list(&raw);
        }
        if let Ok(raw) = std::env::var("KRUISTABEL_TERMINATORS") {
            self.lexicon.block_terminators = split_list(&raw);
        }
        Ok(())
    }
}

/// Vocabulary configuration; see [`crate::lexicon::Lexicon`] for semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub core_task_pattern: String,
    pub work_process_pattern: String,
    pub basis_keyword: String,
    pub profiel_keyword: String,
    pub knowledge_heading: String,
    pub work_process_heading: String,
    pub supplement_phrase: String,
    pub block_terminators: Vec<String>,
    /// Sub-headings inside a block; they end the pending statement or
    /// description without closing the block itself.
    pub subheadings: Vec<String>,
    pub lead_verbs: Vec<String>,
    pub stopwords: Vec<String>,
    /// Extra stopwords merged on top of the built-in list.
    pub extra_stopwords: Vec<String>,
    pub page_furniture_pattern: String,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            core_task_pattern: r"\b[BP]\d+-K\d+\b".to_string(),
            work_process_pattern: r"\b[BP]\d+-K\d+-W\d+\b".to_string(),
            basis_keyword: "Basisdeel".to_string(),
            profiel_keyword: "Profieldeel".to_string(),
            knowledge_heading: "Vakkennis en vaardigheden".to_string(),
            work_process_heading: "Werkprocessen".to_string(),
            supplement_phrase: "geldt aanvullend".to_string(),
            block_terminators: vec![
                "Complexiteit".to_string(),
                "Verantwoordelijkheid en zelfstandigheid".to_string(),
                "Resultaat".to_string(),
                "Gedrag".to_string(),
            ],
            subheadings: vec!["Omschrijving".to_string()],
            lead_verbs: vec![
                "heeft".to_string(),
                "kan".to_string(),
                "kent".to_string(),
                "weet".to_string(),
                "past toe".to_string(),
                "bezit".to_string(),
                "toont".to_string(),
            ],
            stopwords: DEFAULT_STOPWORDS.iter().map(|s| (*s).to_string()).collect(),
            extra_stopwords: Vec::new(),
            page_furniture_pattern:
                r"(?i)(?:\s+pagina\s+\d+(?:\s+van\s+\d+)?|\s+\d+\s+van\s+\d+|\s*\b[bp]\d+-k\d+(?:-w\d+)?)+\s*$"
                    .to_string(),
        }
    }
}

impl LexiconConfig {
    fn merge(&mut self, patch: LexiconPatch) {
        if let Some(v) = patch.core_task_pattern {
            self.core_task_pattern = v;
        }
        if let Some(v) = patch.work_process_pattern {
            self.work_process_pattern = v;
        }
        if let Some(v) = patch.basis_keyword {
            self.basis_keyword = v;
        }
        if let Some(v) = patch.profiel_keyword {
            self.profiel_keyword = v;
        }
        if let Some(v) = patch.knowledge_heading {
            self.knowledge_heading = v;
        }
        if let Some(v) = patch.work_process_heading {
            self.work_process_heading = v;
        }
        if let Some(v) = patch.supplement_phrase {
            self.supplement_phrase = v;
        }
        if let Some(v) = patch.block_terminators {
            self.block_terminators = v;
        }
        if let Some(v) = patch.subheadings {
            self.subheadings = v;
        }
        if let Some(v) = patch.lead_verbs {
            self.lead_verbs = v;
        }
        if let Some(v) = patch.stopwords {
            self.stopwords = v;
        }
        if let Some(v) = patch.extra_stopwords {
            self.extra_stopwords = v;
        }
        if let Some(v) = patch.page_furniture_pattern {
            self.page_furniture_pattern = v;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Acceptance threshold for the cosine-similarity path.
    pub threshold: f32,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            threshold: crate::classify::DEFAULT_ACCEPT_THRESHOLD,
        }
    }
}

impl ClassifyConfig {
    fn merge(&mut self, patch: ClassifyPatch) {
        if let Some(v) = patch.threshold {
            self.threshold = v;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    lexicon: Option<LexiconPatch>,
    classify: Option<ClassifyPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct LexiconPatch {
    core_task_pattern: Option<String>,
    work_process_pattern: Option<String>,
    basis_keyword: Option<String>,
    profiel_keyword: Option<String>,
    knowledge_heading: Option<String>,
    work_process_heading: Option<String>,
    supplement_phrase: Option<String>,
    block_terminators: Option<Vec<String>>,
    subheadings: Option<Vec<String>>,
    lead_verbs: Option<Vec<String>>,
    stopwords: Option<Vec<String>>,
    extra_stopwords: Option<Vec<String>>,
    page_furniture_pattern: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ClassifyPatch {
    threshold: Option<f32>,
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Dutch function words that carry no classification signal. Lead verbs are
/// included: every statement starts with one, so they would co-occur with
/// everything.
const DEFAULT_STOPWORDS: &[&str] = &[
    "aan", "al", "alle", "als", "andere", "bij", "binnen", "daar", "dan", "dat", "de", "deze",
    "die", "dit", "door", "een", "eigen", "en", "er", "geen", "heeft", "het", "hier", "hij", "hoe",
    "hun", "iets", "in", "is", "kan", "kent", "maar", "meer", "met", "naar", "niet", "of", "om",
    "onder", "ook", "op", "over", "past", "te", "tegen", "tijdens", "toe", "tot", "uit", "van",
    "voor", "waar", "wat", "weet", "welke", "wie", "wordt", "worden", "zijn", "zoals", "zodat",
    "zelf", "zich",
];

/// The built-in stopword list as a set.
#[must_use]
pub fn default_stopword_set() -> HashSet<String> {
    DEFAULT_STOPWORDS.iter().map(|s| (*s).to_string()).collect()
}
