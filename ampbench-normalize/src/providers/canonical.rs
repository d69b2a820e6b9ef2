//! Tables that are already in the canonical schema.
//!
//! The `prediction` text is authoritative; `prediction_num` is only used when
//! the text is missing, and a disagreement between the two is an error.

use ampbench_core::{AmpError, CanonicalRecord, Class, Prediction, RawTable, Result};

use super::{collect_records, label_at, Columns};
use crate::provider::Provider;
use crate::Normalizer;

const POSITIVE: &[&str] = &["AMP"];
const NEGATIVE: &[&str] = &["non-AMP"];

#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalNormalizer;

impl Normalizer for CanonicalNormalizer {
    fn provider(&self) -> Provider {
        Provider::Canonical
    }

    fn normalize(&self, raw: RawTable) -> Result<Vec<CanonicalRecord>> {
        let table = raw.normalize_headers();
        let text_col = table.column("prediction");
        let num_col = table.column("prediction_num");
        if text_col.is_none() && num_col.is_none() {
            return Err(AmpError::InvalidInput(
                "canonical table needs a 'prediction' or 'prediction_num' column".into(),
            ));
        }

        for row in 0..table.n_rows() {
            let text = label_at(&table, row, text_col, POSITIVE, NEGATIVE);
            let num = num_col.and_then(|c| table.float_cell(row, c)).and_then(Class::from_f64);
            if let (Some(t), Some(n)) = (text, num) {
                if t.class != n {
                    return Err(AmpError::InvalidInput(format!(
                        "row {} has prediction '{}' but prediction_num {}",
                        row,
                        t,
                        n.as_num()
                    )));
                }
            }
        }

        let cols = Columns::resolve(&table, &["id", "name"], &["sequence"], &["score"]).with_optional_score();
        Ok(collect_records(&table, cols, self.provider(), |row, _| {
            label_at(&table, row, text_col, POSITIVE, NEGATIVE).or_else(|| {
                num_col
                    .and_then(|c| table.float_cell(row, c))
                    .and_then(Class::from_f64)
                    .map(Prediction::new)
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_written_schema() {
        let t = RawTable::from_strs(
            &["id", "sequence", "prediction", "score", "prediction_num"],
            &[
                &["a", "KWKLFKKI", "AMP", "0.9", "1"],
                &["b", "AAAA", "non-AMP*", "0.1", "0"],
                &["c", "GGGG", "", "", ""],
            ],
        )
        .unwrap();
        let recs = CanonicalNormalizer.normalize(t).unwrap();
        assert_eq!(recs[0].prediction_num(), Some(1));
        assert!(recs[1].is_flagged());
        assert_eq!(recs[2].prediction, None);
    }

    #[test]
    fn numeric_only_and_capitalized_headers() {
        let t = RawTable::from_strs(&["Name", "Prediction_num"], &[&["a", "1.0"], &["b", "0.0"]]).unwrap();
        let recs = CanonicalNormalizer.normalize(t).unwrap();
        assert_eq!(recs[0].prediction_label(), "AMP");
        assert_eq!(recs[1].prediction_num(), Some(0));
    }

    #[test]
    fn tsv_style_prediction_header() {
        let t = RawTable::from_strs(&["id", "Prediction"], &[&["a", "non-AMP"]]).unwrap();
        let recs = CanonicalNormalizer.normalize(t).unwrap();
        assert_eq!(recs[0].prediction_num(), Some(0));
    }

    #[test]
    fn disagreement_is_an_error() {
        let t = RawTable::from_strs(&["prediction", "prediction_num"], &[&["AMP", "0"]]).unwrap();
        assert!(CanonicalNormalizer.normalize(t).is_err());
        let t = RawTable::from_strs(&["id"], &[&["a"]]).unwrap();
        assert!(CanonicalNormalizer.normalize(t).is_err());
    }

    #[test]
    fn empty_score_keeps_prediction() {
        let t = RawTable::from_strs(
            &["id", "sequence", "prediction", "score", "prediction_num"],
            &[&["a", "KWKLFKKI", "AMP", "", "1"]],
        )
        .unwrap();
        let recs = CanonicalNormalizer.normalize(t).unwrap();
        assert_eq!(recs[0].prediction_num(), Some(1));
        assert_eq!(recs[0].score, None);
    }
}
