//! DBAASP strain-specific predictions.
//!
//! Each row carries a `Class` (`Active` / `Not Active`) and a predictive value
//! with its type, either combined (`"0.87 (PPV)"` under
//! `Predictive value (Type)`) or already split into two columns. The
//! predictive value becomes the score.
//!
//! Polarity depends on the strain the request was made against. For pathogen
//! strains a PPV row (predicted active) is an AMP and an NPV row is not. For
//! toxicity strains such as human erythrocytes, activity means hemolysis, so
//! PPV maps to `non-AMP` and NPV to `AMP`.

use ampbench_core::{CanonicalRecord, Class, Prediction, RawTable, Result};

use super::{collect_records, Columns};
use crate::provider::{NormalizeOptions, Provider};
use crate::Normalizer;

/// Which predictive value the service reported for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictiveValue {
    Ppv,
    Npv,
}

impl PredictiveValue {
    fn parse(text: &str) -> Option<Self> {
        let t = text.trim().trim_start_matches('(').trim_end_matches(')');
        if t.eq_ignore_ascii_case("PPV") {
            Some(PredictiveValue::Ppv)
        } else if t.eq_ignore_ascii_case("NPV") {
            Some(PredictiveValue::Npv)
        } else {
            None
        }
    }
}

/// Label polarity for a strain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrainPolarity {
    /// Pathogen strains: activity means antimicrobial.
    Pathogen,
    /// Toxicity assays: activity means harm to host cells.
    Toxicity,
}

impl StrainPolarity {
    /// Class implied by the service's "active" call for this strain.
    pub fn active_class(self) -> Class {
        match self {
            StrainPolarity::Pathogen => Class::Positive,
            StrainPolarity::Toxicity => Class::Negative,
        }
    }

    pub fn class_for(self, value: PredictiveValue) -> Class {
        match (self, value) {
            (StrainPolarity::Pathogen, PredictiveValue::Ppv)
            | (StrainPolarity::Toxicity, PredictiveValue::Npv) => Class::Positive,
            (StrainPolarity::Pathogen, PredictiveValue::Npv)
            | (StrainPolarity::Toxicity, PredictiveValue::Ppv) => Class::Negative,
        }
    }
}

/// Split a combined `"0.87 (PPV)"` cell into value and type.
fn split_combined(cell: &str) -> (Option<f64>, Option<PredictiveValue>) {
    let mut parts = cell.split_whitespace();
    let value = parts.next().and_then(|v| v.parse::<f64>().ok()).filter(|v| !v.is_nan());
    let kind = parts.next().and_then(PredictiveValue::parse);
    (value, kind)
}

#[derive(Debug, Clone)]
pub struct DbaaspNormalizer {
    polarity: StrainPolarity,
}

impl DbaaspNormalizer {
    pub fn new(polarity: StrainPolarity) -> Self {
        Self { polarity }
    }

    /// Polarity chosen from the request strain in `opts`.
    pub fn from_options(opts: &NormalizeOptions) -> Self {
        let polarity = if opts.is_toxicity_strain() {
            StrainPolarity::Toxicity
        } else {
            StrainPolarity::Pathogen
        };
        Self::new(polarity)
    }

    pub fn polarity(&self) -> StrainPolarity {
        self.polarity
    }
}

impl Normalizer for DbaaspNormalizer {
    fn provider(&self) -> Provider {
        Provider::Dbaasp
    }

    fn normalize(&self, raw: RawTable) -> Result<Vec<CanonicalRecord>> {
        let table = raw.normalize_headers();
        let combined = table.column("predictive_value_(type)");
        let value_col = table.column("predictive_value");
        let type_col = table.column("type");
        let class_col = table.column("class");
        if combined.is_none() && type_col.is_none() {
            table.require_column(&["class"])?;
        }
        let cols = Columns::resolve(&table, &["id", "name"], &["sequence"], &[]);

        let mut records = collect_records(&table, cols, self.provider(), |row, _| {
            let kind = match combined {
                Some(c) => table.cell(row, c).and_then(|cell| split_combined(cell).1),
                None => type_col
                    .and_then(|c| table.cell(row, c))
                    .and_then(PredictiveValue::parse),
            };
            if let Some(kind) = kind {
                return Some(Prediction::new(self.polarity.class_for(kind)));
            }
            let class = table.cell(row, class_col?)?;
            if class.eq_ignore_ascii_case("Active") {
                Some(Prediction::new(self.polarity.active_class()))
            } else if class.eq_ignore_ascii_case("Not Active") {
                let active = self.polarity.active_class();
                let inactive = if active == Class::Positive {
                    Class::Negative
                } else {
                    Class::Positive
                };
                Some(Prediction::new(inactive))
            } else {
                None
            }
        });

        for (row, rec) in records.iter_mut().enumerate() {
            rec.score = match combined {
                Some(c) => table.cell(row, c).and_then(|cell| split_combined(cell).0),
                None => value_col.and_then(|c| table.float_cell(row, c)),
            };
        }
        Ok(records)
    }
}
