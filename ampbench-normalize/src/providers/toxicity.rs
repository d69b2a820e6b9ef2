//! Hemolytic-toxicity predictors.
//!
//! All four map their positive class (hemolytic, HLP) onto the canonical
//! positive label so toxicity benchmarks share the binary metric pipeline.

use ampbench_core::{CanonicalRecord, Prediction, RawTable, Result};

use super::{collect_records, label_at, Columns};
use crate::provider::Provider;
use crate::Normalizer;

/// HAPPENN: `#, ID, Sequence, nTer, cTer, Prob`; positive when `prob > threshold`.
#[derive(Debug, Clone, Copy)]
pub struct HappennNormalizer {
    pub threshold: f64,
}

impl Normalizer for HappennNormalizer {
    fn provider(&self) -> Provider {
        Provider::Happenn
    }

    fn normalize(&self, raw: RawTable) -> Result<Vec<CanonicalRecord>> {
        let table = raw.normalize_headers().drop_columns(&["#", "nter", "cter"]);
        table.require_column(&["prob", "score"])?;
        let cols = Columns::resolve(&table, &["id", "name"], &["sequence"], &["prob", "score"]);
        let threshold = self.threshold;
        Ok(collect_records(&table, cols, self.provider(), |_, score| {
            let s = score?;
            Some(if s > threshold {
                Prediction::positive()
            } else {
                Prediction::negative()
            })
        }))
    }
}

/// HLPpred-Fuse: the real header is the first data row
/// (`S.NO, FASTA ID, Sequence, HLP or Non-HLP, Prob`).
#[derive(Debug, Clone, Copy, Default)]
pub struct HlpPredFuseNormalizer;

impl Normalizer for HlpPredFuseNormalizer {
    fn provider(&self) -> Provider {
        Provider::HlpPredFuse
    }

    fn normalize(&self, raw: RawTable) -> Result<Vec<CanonicalRecord>> {
        let table = raw.promote_first_row()?.normalize_headers();
        let class = table.require_column(&["hlp_or_non-hlp"])?;
        let cols = Columns::resolve(&table, &["fasta_id", "id"], &["sequence"], &["prob"]);
        Ok(collect_records(&table, cols, self.provider(), |row, _| {
            label_at(&table, row, Some(class), &["HLP"], &["Non-HLP"])
        }))
    }
}

/// HemoPI: two header levels and one trailing summary row;
/// positive when `PROB Score >= threshold`.
#[derive(Debug, Clone, Copy)]
pub struct HemoPiNormalizer {
    pub threshold: f64,
}

impl Normalizer for HemoPiNormalizer {
    fn provider(&self) -> Provider {
        Provider::HemoPi
    }

    fn normalize(&self, raw: RawTable) -> Result<Vec<CanonicalRecord>> {
        let trailing = self.provider().trailing_rows();
        let table = raw
            .drop_trailing_rows(trailing)?
            .collapse_header_levels()
            .normalize_headers();
        tracing::debug!(provider = %self.provider(), rows = trailing, "dropped trailing rows");
        table.require_column(&["prob_score"])?;
        let cols = Columns::resolve(
            &table,
            &["peptide_id", "id"],
            &["peptide_sequence", "sequence"],
            &["prob_score"],
        );
        let threshold = self.threshold;
        Ok(collect_records(&table, cols, self.provider(), |_, score| {
            score.and_then(|s| Prediction::from_score(s, threshold))
        }))
    }
}

/// HemoPred: `Protein, Sequence, Prediction` with `hemolytic` / `non-hemolytic`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HemoPredNormalizer;

impl Normalizer for HemoPredNormalizer {
    fn provider(&self) -> Provider {
        Provider::HemoPred
    }

    fn normalize(&self, raw: RawTable) -> Result<Vec<CanonicalRecord>> {
        let table = raw.normalize_headers();
        let class = table.require_column(&["prediction"])?;
        let cols = Columns::resolve(&table, &["protein", "id"], &["sequence"], &["probability", "score"]);
        Ok(collect_records(&table, cols, self.provider(), |row, _| {
            label_at(&table, row, Some(class), &["hemolytic"], &["non-hemolytic"])
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happenn_threshold_is_strict() {
        let t = RawTable::from_strs(
            &["#", "ID", "Sequence", "nTer", "cTer", "Prob"],
            &[
                &["1", "h1", "KWKLFKKI", "free", "free", "0.5"],
                &["2", "h2", "GLFDIVKKV", "free", "amid", "0.93"],
                &["3", "h3", "AAAA", "free", "free", ""],
            ],
        )
        .unwrap();
        let recs = HappennNormalizer { threshold: 0.5 }.normalize(t).unwrap();
        assert_eq!(recs[0].prediction_num(), Some(0));
        assert_eq!(recs[1].prediction_num(), Some(1));
        assert_eq!(recs[2].prediction, None);
    }

    #[test]
    fn hlppred_fuse_promotes_header() {
        let t = RawTable::from_strs(
            &["0", "1", "2", "3", "4"],
            &[
                &["S.NO", "FASTA ID", "Sequence", "HLP or Non-HLP", "Prob"],
                &["1", "f1", "KWKLFKKI", "HLP", "0.81"],
                &["2", "f2", "AAAA", "Non-HLP", "0.22"],
            ],
        )
        .unwrap();
        let recs = HlpPredFuseNormalizer.normalize(t).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].id, "f1");
        assert_eq!(recs[0].prediction_num(), Some(1));
        assert_eq!(recs[1].prediction_num(), Some(0));
        assert_eq!(recs[1].score, Some(0.22));
    }

    #[test]
    fn hemopi_drops_only_the_trailer() {
        let top = vec!["Result".to_string(); 3];
        let bottom = vec!["Peptide ID".to_string(), "Peptide Sequence".into(), "PROB Score".into()];
        let rows = vec![
            vec!["p1".to_string(), "KWKLFKKI".into(), "0.50".into()],
            vec!["p2".to_string(), "AAAA".into(), "0.12".into()],
            vec!["* Probability scores are computed by SVM".to_string()],
        ];
        let t = RawTable::with_header_levels(vec![top, bottom], rows).unwrap();
        let recs = HemoPiNormalizer { threshold: 0.5 }.normalize(t).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].sequence, "KWKLFKKI");
        assert_eq!(recs[0].prediction_num(), Some(1));
        assert_eq!(recs[1].prediction_num(), Some(0));
    }

    #[test]
    fn hemopred_labels() {
        let t = RawTable::from_strs(
            &["Protein", "Sequence", "Prediction"],
            &[&["x1", "KWKLFKKI", "hemolytic"], &["x2", "AAAA", "non-hemolytic"]],
        )
        .unwrap();
        let recs = HemoPredNormalizer.normalize(t).unwrap();
        assert_eq!(recs[0].id, "x1");
        assert_eq!(recs[0].prediction_label(), "AMP");
        assert_eq!(recs[1].prediction_num(), Some(0));
    }

    #[test]
    fn missing_score_voids_class_labels() {
        let hlp = RawTable::from_strs(
            &["0", "1", "2", "3", "4"],
            &[
                &["S.NO", "FASTA ID", "Sequence", "HLP or Non-HLP", "Prob"],
                &["1", "f1", "KWKLFKKI", "HLP", "NaN"],
                &["2", "f2", "AAAA", "Non-HLP", "0.22"],
            ],
        )
        .unwrap();
        let recs = HlpPredFuseNormalizer.normalize(hlp).unwrap();
        assert_eq!(recs[0].prediction, None);
        assert_eq!(recs[1].prediction_num(), Some(0));

        let pred = RawTable::from_strs(
            &["Protein", "Sequence", "Prediction", "Probability"],
            &[&["x1", "KWKLFKKI", "hemolytic", ""], &["x2", "AAAA", "non-hemolytic", "0.1"]],
        )
        .unwrap();
        let recs = HemoPredNormalizer.normalize(pred).unwrap();
        assert_eq!(recs[0].prediction, None);
        assert_eq!(recs[1].prediction_num(), Some(0));

        let pi = RawTable::from_strs(
            &["Peptide ID", "Peptide Sequence", "PROB Score"],
            &[&["a", "KWKLFKKI", "NaN"], &["footer"]],
        )
        .unwrap();
        let recs = HemoPiNormalizer { threshold: 0.5 }.normalize(pi).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].prediction, None);
    }
}
