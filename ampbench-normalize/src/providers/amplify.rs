//! AMPlify output (`Sequence_ID, Sequence, Score|Probability_score, Prediction`).

use ampbench_core::{CanonicalRecord, RawTable, Result};

use super::{collect_records, label_at, Columns};
use crate::provider::Provider;
use crate::Normalizer;

#[derive(Debug, Clone, Copy, Default)]
pub struct AmplifyNormalizer;

impl Normalizer for AmplifyNormalizer {
    fn provider(&self) -> Provider {
        Provider::Amplify
    }

    fn normalize(&self, raw: RawTable) -> Result<Vec<CanonicalRecord>> {
        let table = raw.normalize_headers();
        let class = table.require_column(&["prediction"])?;
        let cols = Columns::resolve(
            &table,
            &["sequence_id", "id"],
            &["sequence"],
            &["probability_score", "score"],
        );
        Ok(collect_records(&table, cols, self.provider(), |row, _| {
            label_at(&table, row, Some(class), &["AMP"], &["non-AMP"])
        }))
    }
}
