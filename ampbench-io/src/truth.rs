//! Ground-truth tables.
//!
//! Ground truth is a table with a sequence identifier, the sequence and a
//! binary label column (`active`, `class` or `prediction_num`, written as
//! `1`/`0` or `1.0`/`0.0`).

use std::path::{Path, PathBuf};

use ampbench_core::{AmpError, Class, RawTable, Result};
use ampbench_seq::read_fasta;
use serde::Serialize;

use crate::csv::{read_table, write_rows};

/// Label columns accepted in ground-truth tables, in priority order.
pub const LABEL_COLUMNS: [&str; 3] = ["active", "class", "prediction_num"];

/// One labelled sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundTruthRow {
    pub name: String,
    pub sequence: String,
    pub active: f64,
}

impl GroundTruthRow {
    pub fn class(&self) -> Option<Class> {
        Class::from_f64(self.active)
    }
}

/// A validated ground-truth entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledSequence {
    pub name: String,
    pub sequence: String,
    pub class: Class,
}

/// Extract ground-truth entries from a table.
///
/// Name and sequence columns are optional (empty when absent).
///
/// # Errors
///
/// Returns an error if no label column exists or a label is not 0/1.
pub fn ground_truth_from_table(table: RawTable) -> Result<Vec<LabelledSequence>> {
    let table = table.normalize_headers();
    let col = table.require_column(&LABEL_COLUMNS)?;
    let name_col = table.find_column(&["name", "id"]);
    let seq_col = table.find_column(&["sequence"]);
    let text = |row: usize, c: Option<usize>| {
        c.and_then(|c| table.cell(row, c)).unwrap_or_default().to_string()
    };
    (0..table.n_rows())
        .map(|row| {
            let class = table
                .float_cell(row, col)
                .and_then(Class::from_f64)
                .ok_or_else(|| {
                    AmpError::InvalidInput(format!(
                        "ground-truth row {} has label {:?}, expected 0 or 1",
                        row,
                        table.cell(row, col)
                    ))
                })?;
            Ok(LabelledSequence {
                name: text(row, name_col),
                sequence: text(row, seq_col).to_ascii_uppercase(),
                class,
            })
        })
        .collect()
}

/// Read a ground-truth CSV/TSV file.
pub fn read_ground_truth(path: impl AsRef<Path>) -> Result<Vec<LabelledSequence>> {
    ground_truth_from_table(read_table(path)?)
}

/// Label a FASTA file: every record is active when the file name contains `high`.
///
/// Only the final path component is inspected, so a parent directory such as
/// `high_activity/` does not make a `low.fasta` inside it active. The match is
/// case-sensitive.
///
/// # Errors
///
/// Returns an error if the FASTA file cannot be read or parsed.
pub fn ground_truth_from_fasta(path: impl AsRef<Path>) -> Result<Vec<GroundTruthRow>> {
    let path = path.as_ref();
    let active = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.contains("high"));
    let label = if active { 1.0 } else { 0.0 };
    Ok(read_fasta(path)?
        .into_iter()
        .map(|r| GroundTruthRow {
            name: r.id,
            sequence: r.sequence,
            active: label,
        })
        .collect())
}

/// Convert a FASTA file into a sibling ground-truth CSV; returns its path.
pub fn fasta_to_csv(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let rows = ground_truth_from_fasta(path)?;
    let out = path.with_extension("csv");
    write_rows(&out, &rows)?;
    tracing::info!(path = %out.display(), sequences = rows.len(), "saved ground-truth csv");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn labels_from_active_column() {
        let t = RawTable::from_strs(&["name", "sequence", "active"], &[&["a", "KK", "1.0"], &["b", "gg", "0"]])
            .unwrap();
        let truth = ground_truth_from_table(t).unwrap();
        let classes: Vec<Class> = truth.iter().map(|t| t.class).collect();
        assert_eq!(classes, vec![Class::Positive, Class::Negative]);
        assert_eq!(truth[1].name, "b");
        assert_eq!(truth[1].sequence, "GG");
    }

    #[test]
    fn class_column_fallback() {
        let t = RawTable::from_strs(&["Class"], &[&["1"]]).unwrap();
        let truth = ground_truth_from_table(t).unwrap();
        assert_eq!(truth[0].class, Class::Positive);
        assert_eq!(truth[0].name, "");
    }

    #[test]
    fn bad_labels_rejected() {
        let t = RawTable::from_strs(&["active"], &[&["0.5"]]).unwrap();
        assert!(ground_truth_from_table(t).is_err());
        let t = RawTable::from_strs(&["active"], &[&[""]]).unwrap();
        assert!(ground_truth_from_table(t).is_err());
        let t = RawTable::from_strs(&["label"], &[&["1"]]).unwrap();
        assert!(ground_truth_from_table(t).is_err());
    }

    #[test]
    fn fasta_labelled_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let high = dir.path().join("set_high.fasta");
        let low = dir.path().join("set_low.fasta");
        for p in [&high, &low] {
            let mut f = std::fs::File::create(p).unwrap();
            writeln!(f, ">p1\nKWKLFKKI\n>p2\nGLFDIVKKV").unwrap();
        }
        let rows = ground_truth_from_fasta(&high).unwrap();
        assert!(rows.iter().all(|r| r.class() == Some(Class::Positive)));

        let out = fasta_to_csv(&low).unwrap();
        assert_eq!(out.extension().unwrap(), "csv");
        let truth = read_ground_truth(&out).unwrap();
        assert_eq!(truth.len(), 2);
        assert!(truth.iter().all(|t| t.class == Class::Negative));
        assert_eq!(truth[0].sequence, "KWKLFKKI");
    }

    #[test]
    fn parent_directory_name_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("high_activity");
        std::fs::create_dir(&nested).unwrap();
        let low = nested.join("set_low.fasta");
        let mut f = std::fs::File::create(&low).unwrap();
        writeln!(f, ">p1\nKWKLFKKI").unwrap();
        let rows = ground_truth_from_fasta(&low).unwrap();
        assert_eq!(rows[0].class(), Some(Class::Negative));
    }
}
