//! Transaction amount loading from CSV and JSON files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::CliResult;

/// Amounts read from a file, each with its location in that file.
///
/// `rows[i]` is the CSV line number (header on line 1) or the JSON array
/// position of `values[i]`. Skipped entries leave gaps, so positions in
/// `values` cannot be used to find a transaction in the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAmounts {
    pub values: Vec<f64>,
    pub rows: Vec<usize>,
}

impl LoadedAmounts {
    fn from_pairs(pairs: Vec<(usize, f64)>) -> Self {
        let (rows, values) = pairs.into_iter().unzip();
        Self { values, rows }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Load amounts from a CSV file.
///
/// `column` is a header name or a zero-based index; the first column is used
/// when absent. Rows whose cell does not parse as a number are skipped.
pub fn load_csv_data(path: &Path, column: Option<&str>) -> CliResult<LoadedAmounts> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read headers: {}", e))?
        .clone();

    let col_idx = match column {
        Some(col) => match col.parse::<usize>() {
            Ok(idx) => idx,
            Err(_) => headers
                .iter()
                .position(|h| h.trim() == col)
                .ok_or_else(|| format!("Column '{}' not found", col))?,
        },
        None => 0,
    };

    let mut pairs = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| format!("Failed to read record: {}", e))?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        match record.get(col_idx).map(|v| v.trim().parse::<f64>()) {
            Some(Ok(num)) => pairs.push((line, num)),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, "skipped non-numeric rows");
    }

    if pairs.is_empty() {
        return Err("No numeric data found in the specified column".to_string());
    }

    Ok(LoadedAmounts::from_pairs(pairs))
}

/// Numbers in `arr` paired with their array positions.
fn indexed_numbers<F>(arr: &[serde_json::Value], extract: F) -> Vec<(usize, f64)>
where
    F: Fn(&serde_json::Value) -> Option<f64>,
{
    arr.iter()
        .enumerate()
        .filter_map(|(i, v)| extract(v).map(|num| (i, num)))
        .collect()
}

/// Load amounts from a JSON file.
///
/// Accepts an array of numbers, an array of objects (read through `column`
/// or one of the usual amount keys), or an object holding such an array.
pub fn load_json_data(path: &Path, column: Option<&str>) -> CliResult<LoadedAmounts> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("Failed to parse JSON: {}", e))?;

    if let Some(arr) = json.as_array() {
        if !arr.is_empty() && arr.iter().all(|v| v.is_number()) {
            return Ok(LoadedAmounts::from_pairs(indexed_numbers(arr, |v| v.as_f64())));
        }

        let keys: Vec<&str> = match column {
            Some(col) => vec![col],
            None => vec!["amount", "transaction_amount", "value"],
        };
        for key in keys {
            let pairs = indexed_numbers(arr, |obj| obj.get(key).and_then(|v| v.as_f64()));
            if !pairs.is_empty() {
                return Ok(LoadedAmounts::from_pairs(pairs));
            }
        }
    }

    if let Some(obj) = json.as_object() {
        for key in ["amounts", "transactions", "data", "values"] {
            if let Some(arr) = obj.get(key).and_then(|v| v.as_array()) {
                let pairs = indexed_numbers(arr, |v| v.as_f64());
                if !pairs.is_empty() {
                    return Ok(LoadedAmounts::from_pairs(pairs));
                }
            }
        }
    }

    Err("Could not extract numeric data from JSON".to_string())
}

/// Load data from file, choosing the format by extension.
pub fn load_data(path: &Path, column: Option<&str>) -> CliResult<LoadedAmounts> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => load_csv_data(path, column),
        "json" => load_json_data(path, column),
        _ => load_csv_data(path, column).or_else(|_| load_json_data(path, column)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn values(path: &Path, column: Option<&str>) -> Vec<f64> {
        load_data(path, column).unwrap().values
    }

    #[test]
    fn test_csv_by_name_and_index() {
        let file = write_temp(".csv", "id,amount\n1,100.5\n2,200\n3,n/a\n4,300\n");
        assert_eq!(values(file.path(), Some("amount")), vec![100.5, 200.0, 300.0]);
        assert_eq!(values(file.path(), Some("1")), vec![100.5, 200.0, 300.0]);
        assert_eq!(values(file.path(), None), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_csv_rows_keep_file_line_numbers() {
        let file = write_temp(".csv", "id,amount\n1,100.5\n2,200\n3,n/a\n4,300\n");
        let loaded = load_data(file.path(), Some("amount")).unwrap();
        // Header is line 1; the "n/a" row on line 4 is skipped.
        assert_eq!(loaded.rows, vec![2, 3, 5]);
        assert_eq!(loaded.len(), 3);
    }

    #[test]
    fn test_csv_missing_column() {
        let file = write_temp(".csv", "amount\n1\n");
        let err = load_data(file.path(), Some("value")).unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn test_json_number_array() {
        let file = write_temp(".json", "[1.0, 2.5, 1000]");
        let loaded = load_data(file.path(), None).unwrap();
        assert_eq!(loaded.values, vec![1.0, 2.5, 1000.0]);
        assert_eq!(loaded.rows, vec![0, 1, 2]);
    }

    #[test]
    fn test_json_objects_and_wrapped_arrays() {
        let file = write_temp(".json", r#"[{"amount": 10}, {"amount": 20.5}]"#);
        assert_eq!(values(file.path(), None), vec![10.0, 20.5]);

        let file = write_temp(".json", r#"[{"amt": 3}, {"amt": 4}]"#);
        assert_eq!(values(file.path(), Some("amt")), vec![3.0, 4.0]);

        let file = write_temp(".json", r#"{"amounts": [5, 6, 7]}"#);
        assert_eq!(values(file.path(), None), vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_json_rows_skip_objects_without_amount() {
        let file = write_temp(
            ".json",
            r#"[{"amount": 10}, {"memo": "void"}, {"amount": 30}]"#,
        );
        let loaded = load_data(file.path(), None).unwrap();
        assert_eq!(loaded.values, vec![10.0, 30.0]);
        assert_eq!(loaded.rows, vec![0, 2]);
    }

    #[test]
    fn test_json_without_numbers_fails() {
        let file = write_temp(".json", r#"{"name": "ledger"}"#);
        assert!(load_data(file.path(), None).is_err());
    }
}
