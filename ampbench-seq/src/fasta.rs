//! FASTA reading for peptide inputs.
//!
//! Parsing uses needletail. Record ids follow the usual convention: the first
//! whitespace-delimited token of the header line, with the remainder kept as
//! the description.

use std::io::Cursor;
use std::path::Path;

use ampbench_core::{AmpError, Annotated, Result, Sequence};
use needletail::parse_fastx_reader;
use needletail::parser::FastxReader;

/// One FASTA entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub description: Option<String>,
    pub sequence: String,
}

impl FastaRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            sequence: sequence.into(),
        }
    }

    /// Render as a two-line FASTA entry (header and unwrapped sequence).
    pub fn to_fasta(&self) -> String {
        match &self.description {
            Some(d) => format!(">{} {}\n{}\n", self.id, d, self.sequence),
            None => format!(">{}\n{}\n", self.id, self.sequence),
        }
    }
}

impl Sequence for FastaRecord {
    fn as_bytes(&self) -> &[u8] {
        self.sequence.as_bytes()
    }
}

impl Annotated for FastaRecord {
    fn name(&self) -> &str {
        &self.id
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

fn record_from_parts(id: &[u8], seq: &[u8]) -> Result<FastaRecord> {
    let raw_id = std::str::from_utf8(id).map_err(|e| AmpError::Parse(e.to_string()))?;
    let (name, description) = match raw_id.split_once(char::is_whitespace) {
        Some((n, d)) => (n.to_string(), Some(d.trim().to_string())),
        None => (raw_id.to_string(), None),
    };
    let sequence = std::str::from_utf8(seq)
        .map_err(|e| AmpError::Parse(e.to_string()))?
        .to_ascii_uppercase();
    Ok(FastaRecord {
        id: name,
        description,
        sequence,
    })
}

fn collect_records(mut reader: Box<dyn FastxReader>) -> Result<Vec<FastaRecord>> {
    let mut records = Vec::new();
    while let Some(record) = reader.next() {
        let record = record.map_err(|e| AmpError::Parse(e.to_string()))?;
        records.push(record_from_parts(record.id(), &record.seq())?);
    }
    Ok(records)
}

/// Read every record of a FASTA file. An empty file yields no records.
pub fn read_fasta(path: impl AsRef<Path>) -> Result<Vec<FastaRecord>> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path).map_err(|e| {
        AmpError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    if metadata.len() == 0 {
        return Ok(Vec::new());
    }
    let reader =
        needletail::parse_fastx_file(path).map_err(|e| AmpError::Parse(e.to_string()))?;
    let records = collect_records(reader)?;
    tracing::debug!(path = %path.display(), n = records.len(), "read FASTA");
    Ok(records)
}

/// Parse FASTA text held in memory.
pub fn parse_fasta_str(text: &str) -> Result<Vec<FastaRecord>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let reader = parse_fastx_reader(Cursor::new(text.as_bytes().to_vec()))
        .map_err(|e| AmpError::Parse(e.to_string()))?;
    collect_records(reader)
}
