//! Provider adapters.
//!
//! Each adapter reshapes one provider's raw table (header fixes, explicit
//! trailing-row removal), resolves the id/sequence/score/class columns by name
//! and classifies every row. Rows whose class cannot be determined, or whose
//! resolved score cell is missing or `NaN`, keep their place with
//! `prediction == None`.

pub mod ampscanner;
pub mod amplify;
pub mod campr3;
pub mod canonical;
pub mod dbaasp;
pub mod stm;
pub mod toxicity;

use ampbench_core::{CanonicalRecord, Prediction, RawTable};

use crate::provider::Provider;

/// Column indices resolved for one table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Columns {
    pub id: Option<usize>,
    pub sequence: Option<usize>,
    pub score: Option<usize>,
    /// A missing score in a resolved score column voids the row's prediction.
    pub score_required: bool,
}

impl Columns {
    pub fn resolve(table: &RawTable, id: &[&str], sequence: &[&str], score: &[&str]) -> Self {
        Self {
            id: table.find_column(id),
            sequence: table.find_column(sequence),
            score: table.find_column(score),
            score_required: true,
        }
    }

    /// Keep class-derived predictions for rows with an empty score cell.
    pub fn with_optional_score(mut self) -> Self {
        self.score_required = false;
        self
    }
}

/// Build canonical records row by row.
///
/// A missing id falls back to the sequence text. `classify` receives the row
/// index and the parsed score.
pub(crate) fn collect_records<F>(
    table: &RawTable,
    cols: Columns,
    provider: Provider,
    mut classify: F,
) -> Vec<CanonicalRecord>
where
    F: FnMut(usize, Option<f64>) -> Option<Prediction>,
{
    let mut unclassified = 0usize;
    let records: Vec<CanonicalRecord> = (0..table.n_rows())
        .map(|row| {
            let sequence = cols
                .sequence
                .and_then(|c| table.cell(row, c))
                .unwrap_or_default()
                .to_ascii_uppercase();
            let id = cols
                .id
                .and_then(|c| table.cell(row, c))
                .map(str::to_string)
                .unwrap_or_else(|| sequence.clone());
            let score = cols.score.and_then(|c| table.float_cell(row, c));
            let score_missing = cols.score_required && cols.score.is_some() && score.is_none();
            let prediction = classify(row, score).filter(|_| !score_missing);
            if prediction.is_none() {
                unclassified += 1;
            }
            CanonicalRecord {
                id,
                sequence,
                prediction,
                score,
            }
        })
        .collect();
    if unclassified > 0 {
        tracing::warn!(
            provider = %provider,
            rows = unclassified,
            "rows without a usable class will be excluded from metrics"
        );
    }
    records
}

/// Classify a label cell against explicit vocabularies.
pub(crate) fn label_at(
    table: &RawTable,
    row: usize,
    col: Option<usize>,
    positives: &[&str],
    negatives: &[&str],
) -> Option<Prediction> {
    let text = table.cell(row, col?)?;
    Prediction::parse_with(text, positives, negatives)
}
