//! AMP Scanner v2 output (`SeqID, Prediction_Class, Prediction_Probability, Sequence`).
//!
//! Labels are `AMP` / `Non-AMP`, with a `*` suffix on sequences the scanner
//! considers out of its length range. The flag is kept on the canonical label.

use ampbench_core::{CanonicalRecord, RawTable, Result};

use super::{collect_records, label_at, Columns};
use crate::provider::Provider;
use crate::Normalizer;

const POSITIVE: &[&str] = &["AMP"];
const NEGATIVE: &[&str] = &["Non-AMP"];

#[derive(Debug, Clone, Copy, Default)]
pub struct AmpScannerNormalizer;

impl Normalizer for AmpScannerNormalizer {
    fn provider(&self) -> Provider {
        Provider::AmpScannerV2
    }

    fn normalize(&self, raw: RawTable) -> Result<Vec<CanonicalRecord>> {
        let table = raw.normalize_headers();
        let class = table.require_column(&["prediction_class", "prediction"])?;
        let id = ["seqid", "id"];
        table.require_column(&id)?;
        let cols = Columns::resolve(
            &table,
            &id,
            &["sequence"],
            &["prediction_probability", "score"],
        );
        Ok(collect_records(&table, cols, self.provider(), |row, _| {
            label_at(&table, row, Some(class), POSITIVE, NEGATIVE)
        }))
    }
}
