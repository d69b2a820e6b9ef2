//! STM result tables.
//!
//! STM returns one `Predictions` column in submission order, without ids or
//! sequences and without a score. The submitted inputs must be attached
//! positionally before normalization (see [`crate::attach_inputs`]).

use ampbench_core::{CanonicalRecord, RawTable, Result};

use super::{collect_records, label_at, Columns};
use crate::provider::Provider;
use crate::Normalizer;

#[derive(Debug, Clone, Copy, Default)]
pub struct StmNormalizer;

impl Normalizer for StmNormalizer {
    fn provider(&self) -> Provider {
        Provider::Stm
    }

    fn normalize(&self, raw: RawTable) -> Result<Vec<CanonicalRecord>> {
        let table = raw.normalize_headers();
        let class = table.require_column(&["predictions", "prediction"])?;
        table.require_column(&["id"])?;
        table.require_column(&["sequence"])?;
        let cols = Columns::resolve(&table, &["id"], &["sequence"], &[]);
        Ok(collect_records(&table, cols, self.provider(), |row, _| {
            label_at(&table, row, Some(class), &["AMP"], &["Non-AMP"])
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attach_inputs;
    use ampbench_seq::FastaRecord;

    #[test]
    fn attached_inputs_give_ids() {
        let raw = RawTable::from_strs(&["Predictions"], &[&["AMP"], &["Non-AMP"]]).unwrap();
        let inputs = vec![FastaRecord::new("a", "KWKLFKKI"), FastaRecord::new("b", "AAAA")];
        let recs = StmNormalizer.normalize(attach_inputs(raw, &inputs).unwrap()).unwrap();
        assert_eq!(recs[0].id, "a");
        assert_eq!(recs[0].sequence, "KWKLFKKI");
        assert_eq!(recs[0].prediction_num(), Some(1));
        assert_eq!(recs[1].prediction_label(), "non-AMP");
        assert_eq!(recs[1].score, None);
    }

    #[test]
    fn inputs_are_required() {
        let raw = RawTable::from_strs(&["Predictions"], &[&["AMP"]]).unwrap();
        assert!(StmNormalizer.normalize(raw).is_err());
    }
}
