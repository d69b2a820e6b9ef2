//! Canonical records from a local neural-network model.
//!
//! The model itself is external: anything implementing [`SequenceScorer`]
//! receives fixed-width encoded sequences and returns one probability each.

use ampbench_core::{AmpError, BenchConfig, CanonicalRecord, Prediction, Result};
use ampbench_seq::{encode_padded, FastaRecord, LengthWindow, PeptideAlphabet};

/// A model returning one positive-class probability per encoded sequence.
pub trait SequenceScorer {
    fn predict(&self, encoded: &[Vec<u8>]) -> Result<Vec<f64>>;
}

impl<F> SequenceScorer for F
where
    F: Fn(&[Vec<u8>]) -> Result<Vec<f64>>,
{
    fn predict(&self, encoded: &[Vec<u8>]) -> Result<Vec<f64>> {
        self(encoded)
    }
}

/// Encoding, thresholding and flagging settings for local scoring.
#[derive(Debug, Clone)]
pub struct LocalScoring {
    pub alphabet: PeptideAlphabet,
    pub window: LengthWindow,
    pub threshold: f64,
}

fn round4(x: f64) -> f64 {
    (x * 1e4).round() / 1e4
}

impl LocalScoring {
    pub fn from_config(config: &BenchConfig) -> Result<Self> {
        Ok(Self {
            alphabet: PeptideAlphabet::new(&config.alphabet)?,
            window: LengthWindow::new(config.min_length, config.max_length)?,
            threshold: config.threshold,
        })
    }

    /// Score every input. Sequences outside the length window are still
    /// scored (left-padded or tail-truncated to the window maximum) and
    /// their prediction is flagged.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first input with a residue outside the
    /// alphabet, or if the model returns the wrong number of scores.
    pub fn score(&self, model: &dyn SequenceScorer, inputs: &[FastaRecord]) -> Result<Vec<CanonicalRecord>> {
        if let Some(bad) = inputs.iter().find(|r| !self.alphabet.validate(r.sequence.as_bytes())) {
            return Err(AmpError::InvalidInput(format!(
                "sequence '{}' has residues outside the alphabet",
                bad.id
            )));
        }
        let encoded = inputs
            .iter()
            .map(|r| encode_padded(r.sequence.as_bytes(), &self.alphabet, self.window.max))
            .collect::<Result<Vec<_>>>()?;
        let probs = model.predict(&encoded)?;
        if probs.len() != inputs.len() {
            return Err(AmpError::Other(format!(
                "model returned {} scores for {} sequences",
                probs.len(),
                inputs.len()
            )));
        }

        let mut flagged = 0usize;
        let records = inputs
            .iter()
            .zip(probs)
            .map(|(input, p)| {
                let out_of_range = !self.window.contains(input.sequence.len());
                if out_of_range {
                    flagged += 1;
                }
                let prediction =
                    Prediction::from_score(p, self.threshold).map(|pr| pr.with_flag(out_of_range));
                CanonicalRecord::new(
                    input.id.clone(),
                    input.sequence.clone(),
                    prediction,
                    Some(round4(p)).filter(|s| !s.is_nan()),
                )
            })
            .collect();
        tracing::info!(sequences = inputs.len(), flagged, "scored sequences with local model");
        Ok(records)
    }
}
