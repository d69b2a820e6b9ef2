//! Ensemble training sets: per-model scores plus a binary label.
//!
//! A training table carries one `{model}_score` column for each of the three
//! candidate models and a label column (see [`LABEL_COLUMNS`]).

use std::path::Path;

use ampbench_core::{AmpError, Class, RawTable, Result};

use crate::csv::read_table;
use crate::truth::LABEL_COLUMNS;

/// Scores of three base models over labelled candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    pub models: [String; 3],
    /// One `[s1, s2, s3]` row per candidate; missing scores are `NaN`.
    pub scores: Vec<[f64; 3]>,
    pub labels: Vec<Class>,
}

impl TrainingSet {
    /// Extract a training set for `models` from a table.
    ///
    /// # Errors
    ///
    /// Returns an error if a score column or the label column is absent, or a
    /// label is not 0/1.
    pub fn from_table(table: RawTable, models: [&str; 3]) -> Result<Self> {
        let table = table.normalize_headers();
        let mut score_cols = [0usize; 3];
        for (slot, model) in score_cols.iter_mut().zip(models) {
            let name = format!("{}_score", model.to_lowercase());
            *slot = table.require_column(&[name.as_str()])?;
        }
        let label_col = table.require_column(&LABEL_COLUMNS)?;

        let mut scores = Vec::with_capacity(table.n_rows());
        let mut labels = Vec::with_capacity(table.n_rows());
        for row in 0..table.n_rows() {
            let label = table
                .float_cell(row, label_col)
                .and_then(Class::from_f64)
                .ok_or_else(|| {
                    AmpError::InvalidInput(format!(
                        "training row {} has label {:?}, expected 0 or 1",
                        row,
                        table.cell(row, label_col)
                    ))
                })?;
            scores.push(score_cols.map(|c| table.float_cell(row, c).unwrap_or(f64::NAN)));
            labels.push(label);
        }
        Ok(Self {
            models: models.map(str::to_string),
            scores,
            labels,
        })
    }

    /// Read a training set from a CSV/TSV file.
    pub fn read(path: impl AsRef<Path>, models: [&str; 3]) -> Result<Self> {
        Self::from_table(read_table(path)?, models)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of positive candidates.
    pub fn n_positive(&self) -> usize {
        self.labels.iter().filter(|c| **c == Class::Positive).count()
    }
}
