//! CSV/TSV reading into raw tables and serde-driven writing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ::csv::{ReaderBuilder, WriterBuilder};
use ampbench_core::{AmpError, RawTable, Result};
use serde::Serialize;

/// Field delimiter implied by a file extension: tab for `.tsv`, comma otherwise.
pub fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        AmpError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// Read a delimited table from any reader. The first line is the header.
pub fn read_table_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AmpError::Parse(e.to_string()))?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| AmpError::Parse(e.to_string()))?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    RawTable::new(headers, rows)
}

/// Read a CSV or TSV file (delimiter chosen by extension).
pub fn read_table(path: impl AsRef<Path>) -> Result<RawTable> {
    let path = path.as_ref();
    let table = read_table_from_reader(open(path)?, delimiter_for(path))?;
    tracing::debug!(path = %path.display(), rows = table.n_rows(), cols = table.n_cols(), "read table");
    Ok(table)
}

/// Serialize rows to a delimited file with a header derived from `T`.
pub fn write_rows<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter_for(path))
        .from_path(path)
        .map_err(|e| AmpError::Other(format!("{}: {}", path.display(), e)))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AmpError::Other(e.to_string()))?;
    }
    writer.flush()?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote table");
    Ok(())
}
