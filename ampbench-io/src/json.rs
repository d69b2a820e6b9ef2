//! JSON row-array payloads (`[[header...], [row...], ...]`) as raw tables.

use ampbench_core::{AmpError, RawTable, Result};
use serde_json::Value;

fn cell_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Parse a JSON array of arrays whose first element is the header row.
///
/// `null` cells become missing values.
pub fn table_from_json_rows(text: &str) -> Result<RawTable> {
    let value: Value = serde_json::from_str(text).map_err(|e| AmpError::Parse(e.to_string()))?;
    let rows = value
        .as_array()
        .ok_or_else(|| AmpError::Parse("expected a JSON array of rows".into()))?;
    let mut iter = rows.iter();
    let header = iter
        .next()
        .and_then(Value::as_array)
        .ok_or_else(|| AmpError::Parse("missing JSON header row".into()))?;
    let headers = header.iter().map(cell_text).collect();
    let body = iter
        .enumerate()
        .map(|(i, row)| {
            row.as_array()
                .map(|cells| cells.iter().map(cell_text).collect())
                .ok_or_else(|| AmpError::Parse(format!("JSON row {} is not an array", i + 1)))
        })
        .collect::<Result<Vec<Vec<String>>>>()?;
    RawTable::new(headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let text = r#"[["Sequence","Class","Predictive value (Type)"],
                       ["KWKLFKKI","Active","0.87 (PPV)"],
                       ["AAAA",null,0.5]]"#;
        let t = table_from_json_rows(text).unwrap();
        assert_eq!(t.n_rows(), 2);
        assert_eq!(t.headers()[2], "Predictive value (Type)");
        assert_eq!(t.cell(1, 1), None);
        assert_eq!(t.cell(1, 2), Some("0.5"));
    }

    #[test]
    fn rejects_non_tabular_json() {
        assert!(table_from_json_rows(r#"{"a": 1}"#).is_err());
        assert!(table_from_json_rows("[]").is_err());
        assert!(table_from_json_rows(r#"[["a"], 5]"#).is_err());
        assert!(table_from_json_rows("not json").is_err());
    }
}
