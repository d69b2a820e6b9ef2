//! Canonical prediction records.
//!
//! Every provider adapter produces [`CanonicalRecord`]s. The numeric label
//! (`prediction_num`) is never stored: it is derived from the [`Prediction`]
//! on demand, so the two cannot drift apart.

use std::fmt;
use std::str::FromStr;

use crate::error::{AmpError, Result};
use crate::traits::{Annotated, Sequence};

/// Label used for the positive class.
pub const POSITIVE_LABEL: &str = "AMP";
/// Label used for the negative class.
pub const NEGATIVE_LABEL: &str = "non-AMP";
/// Suffix marking a low-confidence or out-of-range prediction.
pub const FLAG_SUFFIX: char = '*';

/// The five canonical column names, in output order.
pub const CANONICAL_COLUMNS: [&str; 5] = ["id", "sequence", "prediction", "score", "prediction_num"];

// ---------------------------------------------------------------------------
// Class / Prediction
// ---------------------------------------------------------------------------

/// Binary class of a peptide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Negative,
    Positive,
}

impl Class {
    /// Numeric encoding: `1` for positive, `0` for negative.
    #[inline]
    pub fn as_num(self) -> u8 {
        match self {
            Class::Positive => 1,
            Class::Negative => 0,
        }
    }

    /// Decode a numeric label. Anything other than 0 or 1 is rejected.
    pub fn from_num(n: u8) -> Option<Self> {
        match n {
            0 => Some(Class::Negative),
            1 => Some(Class::Positive),
            _ => None,
        }
    }

    /// Decode a floating-point label as written by tabular tools (`1.0`, `0.0`).
    pub fn from_f64(x: f64) -> Option<Self> {
        if x == 1.0 {
            Some(Class::Positive)
        } else if x == 0.0 {
            Some(Class::Negative)
        } else {
            None
        }
    }

    /// Canonical label text.
    pub fn label(self) -> &'static str {
        match self {
            Class::Positive => POSITIVE_LABEL,
            Class::Negative => NEGATIVE_LABEL,
        }
    }
}

/// A categorical prediction with an optional audit flag.
///
/// Flagged and unflagged predictions of the same class share a category:
/// `num()` ignores the flag, while `Display` keeps it (`"non-AMP*"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prediction {
    pub class: Class,
    pub flagged: bool,
}

impl Prediction {
    pub fn new(class: Class) -> Self {
        Self {
            class,
            flagged: false,
        }
    }

    pub fn positive() -> Self {
        Self::new(Class::Positive)
    }

    pub fn negative() -> Self {
        Self::new(Class::Negative)
    }

    /// Return a copy carrying the flag.
    pub fn with_flag(self, flagged: bool) -> Self {
        Self {
            flagged: self.flagged || flagged,
            ..self
        }
    }

    /// Numeric label, ignoring the flag.
    #[inline]
    pub fn num(&self) -> u8 {
        self.class.as_num()
    }

    /// Classify by a probability threshold (`score >= threshold` is positive).
    pub fn from_score(score: f64, threshold: f64) -> Option<Self> {
        if score.is_nan() {
            return None;
        }
        Some(if score >= threshold {
            Self::positive()
        } else {
            Self::negative()
        })
    }

    /// Parse a provider label against explicit vocabularies.
    ///
    /// A trailing `*` is split off as the flag before matching; matching is
    /// case-insensitive. Returns `None` for labels in neither vocabulary.
    pub fn parse_with(raw: &str, positives: &[&str], negatives: &[&str]) -> Option<Self> {
        let trimmed = raw.trim();
        let (body, flagged) = match trimmed.strip_suffix(FLAG_SUFFIX) {
            Some(body) => (body.trim_end(), true),
            None => (trimmed, false),
        };
        let class = if positives.iter().any(|p| p.eq_ignore_ascii_case(body)) {
            Class::Positive
        } else if negatives.iter().any(|n| n.eq_ignore_ascii_case(body)) {
            Class::Negative
        } else {
            return None;
        };
        Some(Self { class, flagged })
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class.label())?;
        if self.flagged {
            write!(f, "{FLAG_SUFFIX}")?;
        }
        Ok(())
    }
}

impl FromStr for Prediction {
    type Err = AmpError;

    fn from_str(s: &str) -> Result<Self> {
        Prediction::parse_with(s, &[POSITIVE_LABEL], &[NEGATIVE_LABEL])
            .ok_or_else(|| AmpError::Parse(format!("unknown prediction label '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// CanonicalRecord
// ---------------------------------------------------------------------------

/// One scored sequence in the unified schema.
///
/// `prediction` is `None` when the provider's class column was missing or
/// unparseable; such rows are excluded from metric computation.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub id: String,
    pub sequence: String,
    pub prediction: Option<Prediction>,
    pub score: Option<f64>,
}

impl CanonicalRecord {
    pub fn new(
        id: impl Into<String>,
        sequence: impl Into<String>,
        prediction: Option<Prediction>,
        score: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
            prediction,
            score,
        }
    }

    /// `Some(1)` iff the prediction is positive, `Some(0)` if negative.
    #[inline]
    pub fn prediction_num(&self) -> Option<u8> {
        self.prediction.map(|p| p.num())
    }

    /// Whether the row was flagged as low-confidence or out of range.
    pub fn is_flagged(&self) -> bool {
        self.prediction.map_or(false, |p| p.flagged)
    }

    /// Prediction rendered as text, empty when missing.
    pub fn prediction_label(&self) -> String {
        self.prediction.map(|p| p.to_string()).unwrap_or_default()
    }
}

impl Sequence for CanonicalRecord {
    fn as_bytes(&self) -> &[u8] {
        self.sequence.as_bytes()
    }
}

impl Annotated for CanonicalRecord {
    fn name(&self) -> &str {
        &self.id
    }
}
