//! Paired active/inactive discrimination.
//!
//! Row order encodes the pairing: row `2k` is the active member of pair `k`
//! and row `2k + 1` its inactive counterpart. Callers are responsible for
//! producing that order; nothing here re-derives pairs from content.

use ampbench_core::{CanonicalRecord, Class};

/// Outcome of a pairwise check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairwiseResult {
    /// Pairs with the active member called positive and the inactive member negative.
    pub distinguished: usize,
    /// Complete pairs examined.
    pub total: usize,
}

impl PairwiseResult {
    /// `distinguished / total`, `NaN` for no pairs.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            f64::NAN
        } else {
            self.distinguished as f64 / self.total as f64
        }
    }

    pub fn as_tuple(&self) -> (usize, usize) {
        (self.distinguished, self.total)
    }
}

/// Count correctly separated pairs. Flags are ignored.
///
/// A trailing unpaired row is excluded from the count.
pub fn pairwise_discrimination(records: &[CanonicalRecord]) -> PairwiseResult {
    if records.len() % 2 == 1 {
        tracing::warn!(rows = records.len(), "odd row count, trailing unpaired row excluded");
    }
    let mut result = PairwiseResult::default();
    for pair in records.chunks_exact(2) {
        result.total += 1;
        let active = pair[0].prediction.map(|p| p.class);
        let inactive = pair[1].prediction.map(|p| p.class);
        if active == Some(Class::Positive) && inactive == Some(Class::Negative) {
            result.distinguished += 1;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampbench_core::Prediction;

    fn rows(preds: &[Option<Prediction>]) -> Vec<CanonicalRecord> {
        preds
            .iter()
            .enumerate()
            .map(|(i, p)| CanonicalRecord::new(format!("p{i}"), "KWK", *p, None))
            .collect()
    }

    #[test]
    fn two_pairs_one_distinguished() {
        let r = rows(&[
            Some(Prediction::positive()),
            Some(Prediction::negative()),
            Some(Prediction::positive()),
            Some(Prediction::positive()),
        ]);
        assert_eq!(pairwise_discrimination(&r).as_tuple(), (1, 2));
    }

    #[test]
    fn odd_trailing_row_excluded() {
        let r = rows(&[
            Some(Prediction::positive()),
            Some(Prediction::negative()),
            Some(Prediction::positive()),
        ]);
        let res = pairwise_discrimination(&r);
        assert_eq!(res.as_tuple(), (1, 1));
        assert_eq!(res.fraction(), 1.0);
    }

    #[test]
    fn flags_ignored_and_missing_not_distinguished() {
        let r = rows(&[
            Some(Prediction::positive().with_flag(true)),
            Some(Prediction::negative().with_flag(true)),
            None,
            Some(Prediction::negative()),
        ]);
        assert_eq!(pairwise_discrimination(&r).as_tuple(), (1, 2));
    }

    #[test]
    fn empty_input() {
        let res = pairwise_discrimination(&[]);
        assert_eq!(res.as_tuple(), (0, 0));
        assert!(res.fraction().is_nan());
    }
}
