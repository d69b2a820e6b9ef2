//! In-memory raw result tables.
//!
//! [`RawTable`] is the shape every provider payload is loaded into before
//! normalization: a stack of header levels (top level first) over string
//! cells. Reshaping is explicit and by name; nothing here guesses which rows
//! are real data from their width.

use crate::error::{AmpError, Result};

/// Cell values treated as missing.
const MISSING_MARKERS: [&str; 6] = ["", "nan", "NaN", "NA", "N/A", "None"];

/// Whether a cell value denotes a missing value.
pub fn is_missing(cell: &str) -> bool {
    let t = cell.trim();
    MISSING_MARKERS.iter().any(|m| *m == t)
}

/// Normalize a header: trim, lower-case, whitespace runs become `_`.
pub fn normalize_header(name: &str) -> String {
    name.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// A raw tabular payload with one or more header levels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Header levels, top first. Every level has `n_cols` entries.
    header_levels: Vec<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a single-header table.
    ///
    /// Rows shorter than the header are padded with empty (missing) cells.
    ///
    /// # Errors
    ///
    /// Returns an error if a row is wider than the header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        Self::with_header_levels(vec![headers], rows)
    }

    /// Build a table with several header levels (top level first).
    pub fn with_header_levels(header_levels: Vec<Vec<String>>, mut rows: Vec<Vec<String>>) -> Result<Self> {
        let n_cols = header_levels.first().map_or(0, |h| h.len());
        if let Some(bad) = header_levels.iter().position(|h| h.len() != n_cols) {
            return Err(AmpError::Parse(format!(
                "header level {} has {} columns, expected {}",
                bad,
                header_levels[bad].len(),
                n_cols
            )));
        }
        for (i, row) in rows.iter_mut().enumerate() {
            if row.len() > n_cols {
                return Err(AmpError::Parse(format!(
                    "row {} has {} cells but the header has {} columns",
                    i,
                    row.len(),
                    n_cols
                )));
            }
            row.resize(n_cols, String::new());
        }
        Ok(Self { header_levels, rows })
    }

    /// Convenience constructor from string slices, mostly for tests.
    pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Result<Self> {
        Self::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    /// The effective (lowest) header level.
    pub fn headers(&self) -> &[String] {
        self.header_levels.last().map_or(&[], |h| h.as_slice())
    }

    /// Number of header levels.
    pub fn n_header_levels(&self) -> usize {
        self.header_levels.len()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.headers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Index of the column whose header matches `name` exactly.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers().iter().position(|h| h == name)
    }

    /// Index of the first column matching any of `candidates`.
    pub fn find_column(&self, candidates: &[&str]) -> Option<usize> {
        candidates.iter().find_map(|c| self.column(c))
    }

    /// Like [`find_column`](Self::find_column) but missing columns are an error.
    pub fn require_column(&self, candidates: &[&str]) -> Result<usize> {
        self.find_column(candidates).ok_or_else(|| {
            AmpError::InvalidInput(format!(
                "none of the columns {:?} present in table with headers {:?}",
                candidates,
                self.headers()
            ))
        })
    }

    /// Cell text, or `None` when out of bounds or missing.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        let v = self.rows.get(row)?.get(col)?;
        if is_missing(v) {
            None
        } else {
            Some(v.trim())
        }
    }

    /// Cell parsed as a float; missing or unparseable cells yield `None`.
    pub fn float_cell(&self, row: usize, col: usize) -> Option<f64> {
        self.cell(row, col)?.parse::<f64>().ok().filter(|x| !x.is_nan())
    }

    // -----------------------------------------------------------------------
    // Reshaping
    // -----------------------------------------------------------------------

    /// Lower-case and underscore every header at every level.
    pub fn normalize_headers(mut self) -> Self {
        for level in &mut self.header_levels {
            for h in level.iter_mut() {
                *h = normalize_header(h);
            }
        }
        self
    }

    /// Rename a column (no-op when absent).
    pub fn rename_column(mut self, from: &str, to: &str) -> Self {
        if let Some(level) = self.header_levels.last_mut() {
            for h in level.iter_mut().filter(|h| *h == from) {
                *h = to.to_string();
            }
        }
        self
    }

    /// Remove every column whose effective header is in `names`.
    pub fn drop_columns(mut self, names: &[&str]) -> Self {
        let keep: Vec<bool> = self
            .headers()
            .iter()
            .map(|h| !names.contains(&h.as_str()))
            .collect();
        let retain = |cells: &mut Vec<String>| {
            let mut flags = keep.iter();
            cells.retain(|_| flags.next().copied().unwrap_or(true));
        };
        for level in &mut self.header_levels {
            retain(level);
        }
        for row in &mut self.rows {
            retain(row);
        }
        self
    }

    /// Keep only the lowest header level.
    pub fn collapse_header_levels(mut self) -> Self {
        if self.header_levels.len() > 1 {
            let lowest = self.header_levels.pop().unwrap_or_default();
            self.header_levels = vec![lowest];
        }
        self
    }

    /// Replace the header with the first data row, which is removed.
    ///
    /// # Errors
    ///
    /// Returns an error on a table with no rows.
    pub fn promote_first_row(mut self) -> Result<Self> {
        if self.rows.is_empty() {
            return Err(AmpError::InvalidInput(
                "cannot promote a header from an empty table".into(),
            ));
        }
        let header = self.rows.remove(0);
        self.header_levels = vec![header];
        Ok(self)
    }

    /// Remove exactly `n` trailing rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the table has fewer than `n` rows.
    pub fn drop_trailing_rows(mut self, n: usize) -> Result<Self> {
        if n > self.rows.len() {
            return Err(AmpError::InvalidInput(format!(
                "cannot drop {} trailing rows from a table with {} rows",
                n,
                self.rows.len()
            )));
        }
        self.rows.truncate(self.rows.len() - n);
        Ok(self)
    }

    /// Prepend columns, one value per existing row.
    ///
    /// # Errors
    ///
    /// Returns an error if any column length differs from the row count.
    pub fn with_leading_columns(mut self, columns: Vec<(String, Vec<String>)>) -> Result<Self> {
        for (name, values) in &columns {
            if values.len() != self.rows.len() {
                return Err(AmpError::InvalidInput(format!(
                    "column '{}' has {} values but the table has {} rows",
                    name,
                    values.len(),
                    self.rows.len()
                )));
            }
        }
        let names: Vec<String> = columns.iter().map(|(n, _)| n.clone()).collect();
        for level in &mut self.header_levels {
            let mut new_level = names.clone();
            new_level.append(level);
            *level = new_level;
        }
        for (i, row) in self.rows.iter_mut().enumerate() {
            let mut new_row: Vec<String> = columns.iter().map(|(_, v)| v[i].clone()).collect();
            new_row.append(row);
            *row = new_row;
        }
        Ok(self)
    }
}
