//! Request chunking for size-limited prediction services.

use ampbench_core::{AmpError, Result};

use crate::fasta::FastaRecord;

/// Split records into consecutive chunks of at most `chunk_size`.
///
/// The last chunk may be shorter; an empty input yields no chunks.
pub fn chunk_records(records: &[FastaRecord], chunk_size: usize) -> Result<Vec<&[FastaRecord]>> {
    if chunk_size == 0 {
        return Err(AmpError::InvalidInput("chunk size must be positive".into()));
    }
    Ok(records.chunks(chunk_size).collect())
}

/// Join records into one FASTA payload for submission.
pub fn fasta_payload(records: &[FastaRecord]) -> String {
    records.iter().map(FastaRecord::to_fasta).collect()
}
