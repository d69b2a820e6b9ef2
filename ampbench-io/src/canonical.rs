//! Writing canonical prediction tables.

use std::path::Path;

use ampbench_core::{CanonicalRecord, Result};
use serde::Serialize;

use crate::csv::write_rows;

/// Flat serialization shape of a [`CanonicalRecord`].
#[derive(Debug, Clone, Serialize)]
pub struct CanonicalRow<'a> {
    pub id: &'a str,
    pub sequence: &'a str,
    pub prediction: String,
    pub score: Option<f64>,
    pub prediction_num: Option<u8>,
}

impl<'a> From<&'a CanonicalRecord> for CanonicalRow<'a> {
    fn from(r: &'a CanonicalRecord) -> Self {
        Self {
            id: &r.id,
            sequence: &r.sequence,
            prediction: r.prediction_label(),
            score: r.score,
            prediction_num: r.prediction_num(),
        }
    }
}

/// Write records with the five canonical columns (CSV or TSV by extension).
pub fn write_canonical(path: impl AsRef<Path>, records: &[CanonicalRecord]) -> Result<()> {
    let rows: Vec<CanonicalRow<'_>> = records.iter().map(CanonicalRow::from).collect();
    write_rows(path, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::read_table;
    use ampbench_core::{Prediction, CANONICAL_COLUMNS};
    use tempfile::NamedTempFile;

    #[test]
    fn writes_five_columns_with_derived_num() {
        let file = NamedTempFile::with_suffix(".csv").unwrap();
        let records = vec![
            CanonicalRecord::new("a", "KWKLFKKI", Some(Prediction::positive()), Some(0.91)),
            CanonicalRecord::new("b", "AAAA", Some(Prediction::negative().with_flag(true)), None),
            CanonicalRecord::new("c", "GGG", None, None),
        ];
        write_canonical(file.path(), &records).unwrap();

        let t = read_table(file.path()).unwrap();
        assert_eq!(t.headers(), CANONICAL_COLUMNS);
        assert_eq!(t.cell(0, 4), Some("1"));
        assert_eq!(t.cell(1, 2), Some("non-AMP*"));
        assert_eq!(t.cell(1, 4), Some("0"));
        assert_eq!(t.cell(2, 4), None);
    }
}
