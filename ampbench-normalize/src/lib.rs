//! Schema normalization for antimicrobial-peptide classifier output.
//!
//! Every supported provider has one adapter implementing [`Normalizer`],
//! selected by an explicit [`Provider`] tag:
//!
//! ```
//! use ampbench_core::RawTable;
//! use ampbench_normalize::{normalize, NormalizeOptions, Provider};
//!
//! let raw = RawTable::from_strs(
//!     &["SeqID", "Prediction_Class", "Prediction_Probability", "Sequence"],
//!     &[&["p1", "Non-AMP*", "0.21", "KWK"]],
//! ).unwrap();
//! let records = normalize(Provider::AmpScannerV2, raw, &NormalizeOptions::default()).unwrap();
//! assert_eq!(records[0].prediction_label(), "non-AMP*");
//! assert_eq!(records[0].prediction_num(), Some(0));
//! ```

pub mod inference;
pub mod provider;
pub mod providers;

use ampbench_core::{AmpError, CanonicalRecord, RawTable, Result, Sequence};
use ampbench_seq::{FastaRecord, LengthWindow};

pub use inference::{LocalScoring, SequenceScorer};
pub use provider::{NormalizeOptions, Provider};
pub use providers::ampscanner::AmpScannerNormalizer;
pub use providers::amplify::AmplifyNormalizer;
pub use providers::campr3::Campr3Normalizer;
pub use providers::canonical::CanonicalNormalizer;
pub use providers::dbaasp::{DbaaspNormalizer, PredictiveValue, StrainPolarity};
pub use providers::stm::StmNormalizer;
pub use providers::toxicity::{HappennNormalizer, HemoPiNormalizer, HemoPredNormalizer, HlpPredFuseNormalizer};

/// Converts one provider's raw table into canonical records.
pub trait Normalizer {
    fn provider(&self) -> Provider;

    fn normalize(&self, raw: RawTable) -> Result<Vec<CanonicalRecord>>;
}

/// The adapter for `provider`, configured from `opts`.
pub fn normalizer_for(provider: Provider, opts: &NormalizeOptions) -> Result<Box<dyn Normalizer>> {
    Ok(match provider {
        Provider::AmpScannerV2 => Box::new(AmpScannerNormalizer),
        Provider::Amplify => Box::new(AmplifyNormalizer),
        Provider::Campr3Svm | Provider::Campr3Rf | Provider::Campr3Ann | Provider::Campr3Da => {
            Box::new(Campr3Normalizer::new(provider)?)
        }
        Provider::Dbaasp => Box::new(DbaaspNormalizer::from_options(opts)),
        Provider::Stm => Box::new(StmNormalizer),
        Provider::Happenn => Box::new(HappennNormalizer {
            threshold: opts.threshold,
        }),
        Provider::HlpPredFuse => Box::new(HlpPredFuseNormalizer),
        Provider::HemoPi => Box::new(HemoPiNormalizer {
            threshold: opts.threshold,
        }),
        Provider::HemoPred => Box::new(HemoPredNormalizer),
        Provider::Canonical => Box::new(CanonicalNormalizer),
    })
}

/// Flag every record whose sequence length falls outside `window`.
///
/// Records without a sequence or without a prediction are left untouched.
pub fn flag_out_of_window(records: &mut [CanonicalRecord], window: LengthWindow) -> usize {
    let mut flagged = 0;
    for rec in records.iter_mut() {
        if rec.is_empty() || window.contains(rec.len()) {
            continue;
        }
        if let Some(p) = rec.prediction.as_mut() {
            if !p.flagged {
                p.flagged = true;
                flagged += 1;
            }
        }
    }
    flagged
}

/// Normalize one raw table, then flag out-of-window sequences.
pub fn normalize(provider: Provider, raw: RawTable, opts: &NormalizeOptions) -> Result<Vec<CanonicalRecord>> {
    let mut records = normalizer_for(provider, opts)?.normalize(raw)?;
    if let Some(window) = opts.length_window {
        let flagged = flag_out_of_window(&mut records, window);
        if flagged > 0 {
            tracing::debug!(provider = %provider, flagged, "flagged out-of-window sequences");
        }
    }
    Ok(records)
}

/// Normalize the per-chunk responses of one submission, in submission order.
pub fn normalize_chunks(
    provider: Provider,
    chunks: Vec<RawTable>,
    opts: &NormalizeOptions,
) -> Result<Vec<CanonicalRecord>> {
    let mut all = Vec::new();
    for chunk in chunks {
        all.extend(normalize(provider, chunk, opts)?);
    }
    Ok(all)
}

/// Prepend `id` and `sequence` columns taken positionally from the submitted inputs.
///
/// # Errors
///
/// Returns an error if the table and the inputs differ in length.
pub fn attach_inputs(raw: RawTable, inputs: &[FastaRecord]) -> Result<RawTable> {
    raw.with_leading_columns(vec![
        ("id".into(), inputs.iter().map(|r| r.id.clone()).collect()),
        ("sequence".into(), inputs.iter().map(|r| r.sequence.clone()).collect()),
    ])
}

/// Split the submitted inputs across `chunks` by row count and attach each
/// slice to its chunk, so every chunk can be normalized on its own.
///
/// # Errors
///
/// Returns an error if the chunks hold more or fewer rows than there are inputs.
pub fn attach_inputs_per_chunk(chunks: Vec<RawTable>, inputs: &[FastaRecord]) -> Result<Vec<RawTable>> {
    let rows: usize = chunks.iter().map(RawTable::n_rows).sum();
    if rows != inputs.len() {
        return Err(AmpError::InvalidInput(format!(
            "{} chunk rows for {} submitted sequences",
            rows,
            inputs.len()
        )));
    }
    let mut offset = 0;
    chunks
        .into_iter()
        .map(|chunk| {
            let n = chunk.n_rows();
            let slice = &inputs[offset..offset + n];
            offset += n;
            attach_inputs(chunk, slice)
        })
        .collect()
}
