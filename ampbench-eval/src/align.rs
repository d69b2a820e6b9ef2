//! Pairing prediction rows with ground-truth rows.
//!
//! Rows whose prediction is missing (absent row, or no usable class) are
//! removed from both sides at once and counted as failed, so every rate is
//! computed over the same denominator.

use std::collections::{HashMap, VecDeque};

use ampbench_core::{CanonicalRecord, Class, Result};
use ampbench_io::LabelledSequence;

use crate::confusion::ConfusionMatrix;

/// How prediction rows are matched to ground-truth rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignKey {
    /// Row `i` of the predictions belongs to row `i` of the ground truth.
    #[default]
    Position,
    /// Rows are matched by sequence; repeated sequences match in order.
    Sequence,
    /// Prediction ids are matched to ground-truth names; repeated ids match in order.
    Id,
}

/// Label vectors after the consistency rule, plus the dropped-row count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aligned {
    pub actual: Vec<Class>,
    pub predicted: Vec<Class>,
    pub failed: usize,
}

impl Aligned {
    pub fn len(&self) -> usize {
        self.actual.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actual.is_empty()
    }

    /// Append another aligned batch (pooling across datasets).
    pub fn extend(&mut self, other: Aligned) {
        self.actual.extend(other.actual);
        self.predicted.extend(other.predicted);
        self.failed += other.failed;
    }

    pub fn confusion(&self) -> Result<ConfusionMatrix> {
        let predicted: Vec<Option<Class>> = self.predicted.iter().copied().map(Some).collect();
        let mut cm = ConfusionMatrix::from_labels(&self.actual, &predicted)?;
        cm.failed = self.failed;
        Ok(cm)
    }
}

/// Align predictions to ground truth and apply the consistency rule.
pub fn align(truth: &[LabelledSequence], predictions: &[CanonicalRecord], key: AlignKey) -> Aligned {
    let matched: Vec<Option<Class>> = match key {
        AlignKey::Position => {
            if predictions.len() > truth.len() {
                tracing::warn!(
                    extra = predictions.len() - truth.len(),
                    "prediction rows beyond the ground truth are ignored"
                );
            }
            (0..truth.len())
                .map(|i| predictions.get(i).and_then(|r| r.prediction).map(|p| p.class))
                .collect()
        }
        AlignKey::Sequence => match_by(truth, predictions, |t| &t.sequence, |r| &r.sequence),
        AlignKey::Id => match_by(truth, predictions, |t| &t.name, |r| &r.id),
    };

    let mut aligned = Aligned::default();
    for (t, p) in truth.iter().zip(matched) {
        match p {
            Some(p) => {
                aligned.actual.push(t.class);
                aligned.predicted.push(p);
            }
            None => aligned.failed += 1,
        }
    }
    if aligned.failed > 0 {
        tracing::debug!(failed = aligned.failed, "ground-truth rows without a usable prediction");
    }
    aligned
}

/// Match each ground-truth row to the first unused prediction with the same key.
fn match_by(
    truth: &[LabelledSequence],
    predictions: &[CanonicalRecord],
    truth_key: fn(&LabelledSequence) -> &String,
    pred_key: fn(&CanonicalRecord) -> &String,
) -> Vec<Option<Class>> {
    let mut queues: HashMap<&str, VecDeque<&CanonicalRecord>> = HashMap::new();
    for rec in predictions {
        queues.entry(pred_key(rec).as_str()).or_default().push_back(rec);
    }
    truth
        .iter()
        .map(|t| {
            queues
                .get_mut(truth_key(t).as_str())
                .and_then(VecDeque::pop_front)
                .and_then(|r| r.prediction)
                .map(|p| p.class)
        })
        .collect()
}
