//! Binary confusion matrix and derived rates.
//!
//! Label order is fixed as (negative = 0, positive = 1), so the counts never
//! depend on which classes happen to occur in a batch. Rates with an empty
//! denominator are `NaN`, and `NaN` propagates into every dependent rate.

use ampbench_core::{AmpError, Class, Result, Summarizable};

// ---------------------------------------------------------------------------
// Confusion Matrix
// ---------------------------------------------------------------------------

/// Counts for one (predictions, ground truth) pair.
///
/// `failed` counts ground-truth rows with no usable prediction; they are
/// excluded from every rate. `tn + fp + fn + tp + failed` always equals the
/// number of ground-truth rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_positives: usize,
    pub failed: usize,
}

impl ConfusionMatrix {
    /// Build from ground truth and (possibly missing) predictions.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices have different lengths.
    pub fn from_labels(actual: &[Class], predicted: &[Option<Class>]) -> Result<Self> {
        if actual.len() != predicted.len() {
            return Err(AmpError::InvalidInput(format!(
                "actual length {} != predicted length {}",
                actual.len(),
                predicted.len()
            )));
        }
        let mut cm = Self::default();
        for (&a, &p) in actual.iter().zip(predicted) {
            cm.record(a, p);
        }
        Ok(cm)
    }

    /// Build from predictions on a known-positive set and a known-negative set.
    pub fn from_split(positives: &[Option<Class>], negatives: &[Option<Class>]) -> Self {
        let mut cm = Self::default();
        for &p in positives {
            cm.record(Class::Positive, p);
        }
        for &p in negatives {
            cm.record(Class::Negative, p);
        }
        cm
    }

    /// Add one observation.
    pub fn record(&mut self, actual: Class, predicted: Option<Class>) {
        match (actual, predicted) {
            (_, None) => self.failed += 1,
            (Class::Negative, Some(Class::Negative)) => self.true_negatives += 1,
            (Class::Negative, Some(Class::Positive)) => self.false_positives += 1,
            (Class::Positive, Some(Class::Negative)) => self.false_negatives += 1,
            (Class::Positive, Some(Class::Positive)) => self.true_positives += 1,
        }
    }

    /// Merge counts from another matrix (pooling).
    pub fn merge(&mut self, other: &ConfusionMatrix) {
        self.true_negatives += other.true_negatives;
        self.false_positives += other.false_positives;
        self.false_negatives += other.false_negatives;
        self.true_positives += other.true_positives;
        self.failed += other.failed;
    }

    /// `(tn, fp, fn, tp)` in the fixed label order.
    pub fn ravel(&self) -> (usize, usize, usize, usize) {
        (
            self.true_negatives,
            self.false_positives,
            self.false_negatives,
            self.true_positives,
        )
    }

    /// Number of counted (non-failed) observations.
    pub fn counted(&self) -> usize {
        self.true_negatives + self.false_positives + self.false_negatives + self.true_positives
    }

    /// Counted plus failed observations.
    pub fn total(&self) -> usize {
        self.counted() + self.failed
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::from(self)
    }
}

impl Summarizable for ConfusionMatrix {
    fn summary(&self) -> String {
        format!(
            "tn: {}, fp: {}, fn: {}, tp: {}, failed: {}",
            self.true_negatives,
            self.false_positives,
            self.false_negatives,
            self.true_positives,
            self.failed
        )
    }
}

// ---------------------------------------------------------------------------
// Derived metrics
// ---------------------------------------------------------------------------

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        f64::NAN
    } else {
        num as f64 / denom as f64
    }
}

/// Rates derived from a [`ConfusionMatrix`]. Undefined rates are `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub tpr: f64,
    pub tnr: f64,
    pub fpr: f64,
    pub fnr: f64,
    pub f1_score: f64,
    pub accuracy: f64,
    pub precision: f64,
}

impl From<&ConfusionMatrix> for Metrics {
    fn from(cm: &ConfusionMatrix) -> Self {
        let (tn, fp, fn_, tp) = cm.ravel();
        let tpr = ratio(tp, tp + fn_);
        let tnr = ratio(tn, tn + fp);
        let precision = ratio(tp, tp + fp);
        let f1_score = if tp + fp == 0 || tp + fn_ == 0 {
            f64::NAN
        } else {
            ratio(2 * tp, 2 * tp + fp + fn_)
        };
        Self {
            tpr,
            tnr,
            fpr: 1.0 - tnr,
            fnr: 1.0 - tpr,
            f1_score,
            accuracy: ratio(tp + tn, cm.counted()),
            precision,
        }
    }
}

impl Summarizable for Metrics {
    fn summary(&self) -> String {
        format!(
            "acc {:.4}, tpr {:.4}, fpr {:.4}, precision {:.4}, f1 {:.4}",
            self.accuracy, self.tpr, self.fpr, self.precision, self.f1_score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampbench_core::Class::{Negative as N, Positive as P};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn balanced_scenario() {
        let cm = ConfusionMatrix::from_labels(&[P, P, N, N], &[Some(P), Some(N), Some(N), Some(P)]).unwrap();
        assert_eq!(cm.ravel(), (1, 1, 1, 1));
        let m = cm.metrics();
        assert!(approx(m.accuracy, 0.5));
        assert!(approx(m.tpr, 0.5));
        assert!(approx(m.fpr, 0.5));
        assert!(approx(m.f1_score, 0.5));
    }

    #[test]
    fn missing_predictions_count_as_failed() {
        let cm = ConfusionMatrix::from_labels(&[P, N, P], &[Some(P), None, None]).unwrap();
        assert_eq!(cm.failed, 2);
        assert_eq!(cm.counted(), 1);
        assert_eq!(cm.total(), 3);
        assert!(approx(cm.metrics().accuracy, 1.0));
    }

    #[test]
    fn label_order_fixed_without_positives() {
        let cm = ConfusionMatrix::from_labels(&[N, N], &[Some(N), Some(N)]).unwrap();
        assert_eq!(cm.ravel(), (2, 0, 0, 0));
        let m = cm.metrics();
        assert!(m.tpr.is_nan());
        assert!(m.fnr.is_nan());
        assert!(m.f1_score.is_nan());
        assert!(approx(m.tnr, 1.0));
        assert!(approx(m.fpr, 0.0));
        assert!(approx(m.accuracy, 1.0));
    }

    #[test]
    fn empty_input_is_all_nan() {
        let m = ConfusionMatrix::default().metrics();
        assert!(m.accuracy.is_nan());
        assert!(m.tpr.is_nan());
        assert!(m.tnr.is_nan());
        assert!(m.fpr.is_nan());
    }

    #[test]
    fn f1_zero_when_defined_but_no_hits() {
        let cm = ConfusionMatrix::from_labels(&[P, N], &[Some(N), Some(P)]).unwrap();
        assert!(approx(cm.metrics().f1_score, 0.0));
    }

    #[test]
    fn split_sets() {
        let cm = ConfusionMatrix::from_split(&[Some(P), Some(N), None], &[Some(N), Some(P), Some(N)]);
        assert_eq!(cm.ravel(), (2, 1, 1, 1));
        assert_eq!(cm.failed, 1);
        assert!(cm.summary().contains("failed: 1"));
        assert!(approx(cm.metrics().precision, 0.5));
        assert!(cm.metrics().summary().contains("precision 0.5000"));
    }

    #[test]
    fn length_mismatch_error() {
        assert!(ConfusionMatrix::from_labels(&[P], &[]).is_err());
    }

    #[test]
    fn merge_pools_counts() {
        let mut a = ConfusionMatrix::from_labels(&[P], &[Some(P)]).unwrap();
        let b = ConfusionMatrix::from_labels(&[N, N], &[Some(P), None]).unwrap();
        a.merge(&b);
        assert_eq!(a.ravel(), (0, 1, 0, 1));
        assert_eq!(a.failed, 1);
    }
}
