//! Provider tags and per-call normalization options.

use std::fmt;
use std::str::FromStr;

use ampbench_core::{AmpError, BenchConfig, Result};
use ampbench_seq::LengthWindow;

/// Classifier service or local model whose output can be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    AmpScannerV2,
    Amplify,
    Campr3Svm,
    Campr3Rf,
    Campr3Ann,
    Campr3Da,
    Dbaasp,
    Stm,
    Happenn,
    HlpPredFuse,
    HemoPi,
    HemoPred,
    /// An already-normalized table, validated and re-derived.
    Canonical,
}

impl Provider {
    pub const ALL: [Provider; 13] = [
        Provider::AmpScannerV2,
        Provider::Amplify,
        Provider::Campr3Svm,
        Provider::Campr3Rf,
        Provider::Campr3Ann,
        Provider::Campr3Da,
        Provider::Dbaasp,
        Provider::Stm,
        Provider::Happenn,
        Provider::HlpPredFuse,
        Provider::HemoPi,
        Provider::HemoPred,
        Provider::Canonical,
    ];

    /// Stable tag used on the command line and in output file names.
    pub fn name(self) -> &'static str {
        match self {
            Provider::AmpScannerV2 => "ampscanner_v2",
            Provider::Amplify => "amplify",
            Provider::Campr3Svm => "campr3_svm",
            Provider::Campr3Rf => "campr3_rf",
            Provider::Campr3Ann => "campr3_ann",
            Provider::Campr3Da => "campr3_da",
            Provider::Dbaasp => "dbaasp",
            Provider::Stm => "stm",
            Provider::Happenn => "happenn",
            Provider::HlpPredFuse => "hlppred_fuse",
            Provider::HemoPi => "hemopi",
            Provider::HemoPred => "hemopred",
            Provider::Canonical => "canonical",
        }
    }

    /// Number of boilerplate rows the provider appends after its predictions.
    pub fn trailing_rows(self) -> usize {
        match self {
            Provider::HemoPi => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = AmpError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Provider::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| AmpError::InvalidInput(format!("unknown provider '{s}'")))
    }
}

/// Settings an adapter may need beyond the raw table itself.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    /// Probability threshold for providers that report only a score.
    pub threshold: f64,
    /// Strain the request was made against (strain-based providers only).
    pub strain: Option<String>,
    /// Strains whose predictive-value polarity is inverted.
    pub toxicity_strains: Vec<String>,
    /// Sequences outside this window get their prediction flagged.
    pub length_window: Option<LengthWindow>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::from_config(&BenchConfig::default())
    }
}

impl NormalizeOptions {
    pub fn from_config(config: &BenchConfig) -> Self {
        Self {
            threshold: config.threshold,
            strain: None,
            toxicity_strains: config.toxicity_strains.clone(),
            length_window: Some(LengthWindow {
                min: config.min_length,
                max: config.max_length,
            }),
        }
    }

    pub fn with_strain(mut self, strain: impl Into<String>) -> Self {
        self.strain = Some(strain.into());
        self
    }

    pub fn without_length_window(mut self) -> Self {
        self.length_window = None;
        self
    }

    /// Whether the configured strain is a toxicity assay.
    pub fn is_toxicity_strain(&self) -> bool {
        self.strain.as_deref().map_or(false, |s| {
            self.toxicity_strains
                .iter()
                .any(|t| t.eq_ignore_ascii_case(s.trim()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for p in Provider::ALL {
            assert_eq!(p.name().parse::<Provider>().unwrap(), p);
        }
        assert_eq!("HLPpred-Fuse".parse::<Provider>().unwrap(), Provider::HlpPredFuse);
        assert!("nope".parse::<Provider>().is_err());
    }

    #[test]
    fn toxicity_strain_detection() {
        let opts = NormalizeOptions::default().with_strain("Human erythrocytes");
        assert!(opts.is_toxicity_strain());
        let opts = NormalizeOptions::default().with_strain("Candida albicans");
        assert!(!opts.is_toxicity_strain());
        assert!(!NormalizeOptions::default().is_toxicity_strain());
    }
}
