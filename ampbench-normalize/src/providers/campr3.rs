//! CAMPR3 result tables, one per algorithm (SVM, RF, ANN, DA).
//!
//! The service reports `AMP` / `NAMP` classes; the ANN model reports no
//! probability. The table carries no sequence column, so callers that need
//! sequences attach the submitted inputs first (see [`crate::attach_inputs`]).

use ampbench_core::{AmpError, CanonicalRecord, RawTable, Result};

use super::{collect_records, label_at, Columns};
use crate::provider::Provider;
use crate::Normalizer;

const POSITIVE: &[&str] = &["AMP"];
const NEGATIVE: &[&str] = &["NAMP", "Non-AMP"];

#[derive(Debug, Clone, Copy)]
pub struct Campr3Normalizer {
    provider: Provider,
}

impl Campr3Normalizer {
    /// Adapter for one CAMPR3 algorithm.
    ///
    /// # Errors
    ///
    /// Returns an error if `provider` is not a CAMPR3 variant.
    pub fn new(provider: Provider) -> Result<Self> {
        match provider {
            Provider::Campr3Svm | Provider::Campr3Rf | Provider::Campr3Ann | Provider::Campr3Da => {
                Ok(Self { provider })
            }
            other => Err(AmpError::InvalidInput(format!(
                "{other} is not a CAMPR3 algorithm"
            ))),
        }
    }
}

impl Normalizer for Campr3Normalizer {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn normalize(&self, raw: RawTable) -> Result<Vec<CanonicalRecord>> {
        let table = raw.normalize_headers();
        let class = table.require_column(&["class", "prediction"])?;
        let id = ["id", "seq._id.", "seq._id", "seq_id"];
        table.require_column(&id)?;
        let cols = Columns::resolve(
            &table,
            &id,
            &["sequence"],
            &["amp_probability", "probability", "score"],
        );
        Ok(collect_records(&table, cols, self.provider, |row, _| {
            label_at(&table, row, Some(class), POSITIVE, NEGATIVE)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namp_is_negative() {
        let t = RawTable::from_strs(
            &["Seq. ID.", "Class", "AMP Probability"],
            &[&["p1", "AMP", "0.93"], &["p2", "NAMP", "0.12"]],
        )
        .unwrap();
        let recs = Campr3Normalizer::new(Provider::Campr3Rf).unwrap().normalize(t).unwrap();
        assert_eq!(recs[0].id, "p1");
        assert_eq!(recs[0].prediction_num(), Some(1));
        assert_eq!(recs[1].prediction_label(), "non-AMP");
        assert_eq!(recs[1].score, Some(0.12));
    }

    #[test]
    fn ann_has_no_score() {
        let t = RawTable::from_strs(&["Seq. ID.", "Class"], &[&["p1", "AMP"]]).unwrap();
        let recs = Campr3Normalizer::new(Provider::Campr3Ann).unwrap().normalize(t).unwrap();
        assert_eq!(recs[0].score, None);
        assert_eq!(recs[0].prediction_num(), Some(1));
    }

    #[test]
    fn only_campr3_variants_accepted() {
        assert!(Campr3Normalizer::new(Provider::Stm).is_err());
    }

    #[test]
    fn missing_probability_voids_prediction() {
        let t = RawTable::from_strs(
            &["Seq. ID.", "Class", "AMP Probability"],
            &[&["p1", "AMP", "NA"], &["p2", "NAMP", "0.3"]],
        )
        .unwrap();
        let recs = Campr3Normalizer::new(Provider::Campr3Svm).unwrap().normalize(t).unwrap();
        assert_eq!(recs[0].prediction, None);
        assert_eq!(recs[1].prediction_num(), Some(0));
    }
}
