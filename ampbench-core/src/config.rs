//! Explicit, versioned configuration passed into each component.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AmpError, Result};

/// Current configuration schema version.
pub const CONFIG_VERSION: u32 = 1;

/// Residue alphabets are a wildcard plus the 20 standard amino acids.
pub const ALPHABET_SIZE: usize = 21;

/// Which benchmark family a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchMode {
    Amp,
    Toxicity,
}

impl FromStr for BenchMode {
    type Err = AmpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "amp" => Ok(BenchMode::Amp),
            "toxicity" => Ok(BenchMode::Toxicity),
            other => Err(AmpError::InvalidInput(format!(
                "unknown benchmark mode '{other}' (expected 'amp' or 'toxicity')"
            ))),
        }
    }
}

impl fmt::Display for BenchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchMode::Amp => f.write_str("amp"),
            BenchMode::Toxicity => f.write_str("toxicity"),
        }
    }
}

/// All tunables of the normalization and benchmarking pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub version: u32,
    /// Residue alphabet; position in the string is the integer encoding.
    pub alphabet: String,
    /// Shortest sequence a provider scores without flagging.
    pub min_length: usize,
    /// Longest sequence a provider scores without flagging.
    pub max_length: usize,
    /// Probability at or above which a sequence is called positive.
    pub threshold: f64,
    pub amp_models: Vec<String>,
    pub toxicity_models: Vec<String>,
    /// Strains whose predictive-value polarity is inverted (toxicity assays).
    pub toxicity_strains: Vec<String>,
    pub dbaasp_strains: Vec<String>,
    /// Sequences per request for size-limited providers.
    pub dbaasp_chunk_size: usize,
    pub grid_resolution: f64,
    pub top_k: usize,
    /// The three base models mixed by the ensemble grid search.
    pub candidate_selection_models: Vec<String>,
    /// Decimal digits kept in persisted benchmark summaries.
    pub decimals: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            alphabet: "XACDEFGHIKLMNPQRSTVWY".into(),
            min_length: 10,
            max_length: 200,
            threshold: 0.5,
            amp_models: [
                "ampscanner_v2",
                "amplify",
                "campr3_ann",
                "campr3_da",
                "campr3_rf",
                "campr3_svm",
                "dbaasp",
                "stm",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            toxicity_models: ["happenn", "hemopi", "hemopred", "hlppred_fuse"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            toxicity_strains: vec!["Human erythrocytes".into()],
            dbaasp_strains: [
                "Escherichia coli ATCC 25922",
                "Pseudomonas aeruginosa ATCC 27853",
                "Klebsiella pneumonia",
                "Staphylococcus aureus ATCC 25923",
                "Human erythrocytes",
                "Bacillus Subtilis",
                "Candida albicans",
                "Saccharomyces cerevisiae",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            dbaasp_chunk_size: 400,
            grid_resolution: 0.01,
            top_k: 100,
            candidate_selection_models: ["ampscanner_v2", "amplify", "campr3_rf"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            decimals: 4,
        }
    }
}

impl BenchConfig {
    /// Load a JSON configuration file. Absent fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            AmpError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.display(), e),
            ))
        })?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| AmpError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject internally inconsistent settings.
    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            return Err(AmpError::Config(format!(
                "unsupported config version {} (expected {})",
                self.version, CONFIG_VERSION
            )));
        }
        let symbols: Vec<char> = self.alphabet.chars().map(|c| c.to_ascii_uppercase()).collect();
        if symbols.len() != ALPHABET_SIZE {
            return Err(AmpError::Config(format!(
                "alphabet has {} symbols, expected {}",
                symbols.len(),
                ALPHABET_SIZE
            )));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = symbols.iter().find(|c| !seen.insert(**c)) {
            return Err(AmpError::Config(format!("duplicate symbol '{dup}' in alphabet")));
        }
        if self.min_length > self.max_length {
            return Err(AmpError::Config(format!(
                "min_length {} exceeds max_length {}",
                self.min_length, self.max_length
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(AmpError::Config(format!(
                "threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        if !(self.grid_resolution > 0.0 && self.grid_resolution < 1.0) {
            return Err(AmpError::Config(format!(
                "grid_resolution {} outside (0, 1)",
                self.grid_resolution
            )));
        }
        if self.top_k == 0 {
            return Err(AmpError::Config("top_k must be positive".into()));
        }
        if self.dbaasp_chunk_size == 0 {
            return Err(AmpError::Config("dbaasp_chunk_size must be positive".into()));
        }
        if self.candidate_selection_models.len() != 3 {
            return Err(AmpError::Config(format!(
                "candidate_selection_models must name exactly 3 models, got {}",
                self.candidate_selection_models.len()
            )));
        }
        Ok(())
    }

    /// Model names benchmarked in the given mode.
    pub fn models_for(&self, mode: BenchMode) -> &[String] {
        match mode {
            BenchMode::Amp => &self.amp_models,
            BenchMode::Toxicity => &self.toxicity_models,
        }
    }

    /// Whether a strain is a toxicity assay (inverted predictive-value polarity).
    pub fn is_toxicity_strain(&self, strain: &str) -> bool {
        self.toxicity_strains
            .iter()
            .any(|s| s.eq_ignore_ascii_case(strain.trim()))
    }

    /// The three candidate-selection models as a fixed-size array.
    pub fn candidate_models(&self) -> Result<[&str; 3]> {
        match self.candidate_selection_models.as_slice() {
            [a, b, c] => Ok([a.as_str(), b.as_str(), c.as_str()]),
            other => Err(AmpError::Config(format!(
                "candidate_selection_models must name exactly 3 models, got {}",
                other.len()
            ))),
        }
    }
}
