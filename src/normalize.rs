//! Input normalization: raw request payloads to fixed-shape tensors.
//!
//! Both entry paths produce the `(1, TIME_STEPS, FEATURES)` tensor every
//! variant consumes. No numeric rescaling happens here; the models were
//! trained on unscaled sensor values.

use ndarray::Array3;
use serde_json::Value;

use crate::error::InferError;
use crate::model::{FEATURES, TIME_STEPS};

/// Column count of the raw sensor export. The trailing ten columns are
/// metadata and are dropped before validation; truncation is always from the
/// tail, never the head.
pub const RAW_COLUMNS: usize = 90;

/// Flatten an arbitrarily nested JSON numeric array into a
/// `(1, TIME_STEPS, FEATURES)` tensor.
///
/// The flattened length must be exactly `TIME_STEPS * FEATURES`; anything
/// else is a shape mismatch naming the expected window.
pub fn tensor_from_array(input: &Value) -> Result<Array3<f32>, InferError> {
    let mut flat = Vec::with_capacity(TIME_STEPS * FEATURES);
    flatten_numbers(input, &mut flat)?;

    if flat.len() != TIME_STEPS * FEATURES {
        return Err(InferError::ShapeMismatch {
            expected_rows: TIME_STEPS,
            expected_cols: FEATURES,
            actual: flat.len(),
        });
    }

    Array3::from_shape_vec((1, TIME_STEPS, FEATURES), flat)
        .map_err(|e| InferError::MalformedInput(e.to_string()))
}

fn flatten_numbers(value: &Value, out: &mut Vec<f32>) -> Result<(), InferError> {
    match value {
        Value::Number(n) => {
            let v = n
                .as_f64()
                .ok_or_else(|| InferError::MalformedInput(format!("non-finite number: {n}")))?;
            out.push(v as f32);
            Ok(())
        }
        Value::Array(items) => {
            for item in items {
                flatten_numbers(item, out)?;
            }
            Ok(())
        }
        other => Err(InferError::MalformedInput(format!(
            "expected a number or array of numbers, got {other}"
        ))),
    }
}

/// Parse CSV bytes (header row optional) into a `(1, TIME_STEPS, FEATURES)`
/// tensor.
///
/// A table with exactly [`RAW_COLUMNS`] columns loses its trailing ten before
/// validation. After truncation the width must be exactly `FEATURES` and at
/// least `TIME_STEPS` rows must be present; rows beyond the window are
/// silently ignored.
pub fn tensor_from_csv(bytes: &[u8]) -> Result<Array3<f32>, InferError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes);

    let mut rows: Vec<Vec<f32>> = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| InferError::MalformedInput(e.to_string()))?;
        match parse_row(&record) {
            Ok(row) => rows.push(row),
            // A non-numeric first record is a header row.
            Err(_) if index == 0 => continue,
            Err(e) => return Err(e),
        }
    }

    if rows.first().map(Vec::len) == Some(RAW_COLUMNS) {
        for row in &mut rows {
            row.truncate(FEATURES);
        }
    }

    let width = rows.first().map(Vec::len).unwrap_or(0);
    if width != FEATURES {
        return Err(InferError::ColumnCountMismatch {
            expected: FEATURES,
            actual: width,
        });
    }
    if rows.len() < TIME_STEPS {
        return Err(InferError::InsufficientRows {
            expected: TIME_STEPS,
            actual: rows.len(),
        });
    }

    let flat: Vec<f32> = rows.into_iter().take(TIME_STEPS).flatten().collect();
    Array3::from_shape_vec((1, TIME_STEPS, FEATURES), flat)
        .map_err(|e| InferError::MalformedInput(e.to_string()))
}

fn parse_row(record: &csv::StringRecord) -> Result<Vec<f32>, InferError> {
    record
        .iter()
        .map(|field| {
            field
                .trim()
                .parse::<f32>()
                .map_err(|_| InferError::MalformedInput(format!("non-numeric value: {field:?}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn csv_of(rows: usize, cols: usize, value: f32) -> String {
        let row = vec![value.to_string(); cols].join(",");
        vec![row; rows].join("\n")
    }

    #[test]
    fn test_array_flat_window_succeeds() {
        let input = json!(vec![0.5_f64; TIME_STEPS * FEATURES]);
        let tensor = tensor_from_array(&input).unwrap();
        assert_eq!(tensor.shape(), &[1, TIME_STEPS, FEATURES]);
        assert_eq!(tensor[[0, 19, 79]], 0.5);
    }

    #[test]
    fn test_array_nested_window_succeeds() {
        let input = json!(vec![vec![1.0_f64; FEATURES]; TIME_STEPS]);
        let tensor = tensor_from_array(&input).unwrap();
        assert_eq!(tensor.shape(), &[1, TIME_STEPS, FEATURES]);
    }

    #[test]
    fn test_array_wrong_length_is_shape_mismatch() {
        let input = json!(vec![0.0_f64; 30]);
        let err = tensor_from_array(&input).unwrap_err();
        match err {
            InferError::ShapeMismatch {
                expected_rows,
                expected_cols,
                actual,
            } => {
                assert_eq!((expected_rows, expected_cols), (20, 80));
                assert_eq!(actual, 30);
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_array_rejects_non_numeric_leaf() {
        let input = json!([[1.0, "x"], [2.0, 3.0]]);
        assert!(matches!(
            tensor_from_array(&input),
            Err(InferError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_csv_exact_window() {
        let csv = csv_of(TIME_STEPS, FEATURES, 1.5);
        let tensor = tensor_from_csv(csv.as_bytes()).unwrap();
        assert_eq!(tensor.shape(), &[1, TIME_STEPS, FEATURES]);
        assert_eq!(tensor[[0, 0, 0]], 1.5);
    }

    #[test]
    fn test_csv_raw_export_drops_trailing_columns() {
        // First 80 columns are 2.0, trailing 10 are 9.0; the nines must vanish.
        let row = [vec!["2.0"; FEATURES], vec!["9.0"; RAW_COLUMNS - FEATURES]]
            .concat()
            .join(",");
        let csv = vec![row; TIME_STEPS].join("\n");
        let tensor = tensor_from_csv(csv.as_bytes()).unwrap();
        assert_eq!(tensor.shape(), &[1, TIME_STEPS, FEATURES]);
        assert_eq!(tensor[[0, 0, FEATURES - 1]], 2.0);
        assert!(tensor.iter().all(|&v| v == 2.0));
    }

    #[test]
    fn test_csv_wrong_width_is_column_mismatch() {
        let csv = csv_of(TIME_STEPS, 85, 0.0);
        match tensor_from_csv(csv.as_bytes()).unwrap_err() {
            InferError::ColumnCountMismatch { expected, actual } => {
                assert_eq!(expected, FEATURES);
                assert_eq!(actual, 85);
            }
            other => panic!("expected ColumnCountMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_csv_nineteen_rows_is_insufficient() {
        let csv = csv_of(19, FEATURES, 0.0);
        match tensor_from_csv(csv.as_bytes()).unwrap_err() {
            InferError::InsufficientRows { expected, actual } => {
                assert_eq!(expected, TIME_STEPS);
                assert_eq!(actual, 19);
            }
            other => panic!("expected InsufficientRows, got {other:?}"),
        }
    }

    #[test]
    fn test_csv_twenty_rows_succeeds() {
        let csv = csv_of(TIME_STEPS, FEATURES, 0.0);
        assert!(tensor_from_csv(csv.as_bytes()).is_ok());
    }

    #[test]
    fn test_csv_extra_rows_are_ignored() {
        // 20 rows of zeros, then 5 rows of nines. Only the zeros may land in
        // the tensor.
        let mut lines = vec![csv_of(1, FEATURES, 0.0); TIME_STEPS];
        lines.extend(vec![csv_of(1, FEATURES, 9.0); 5]);
        let csv = lines.join("\n");
        let tensor = tensor_from_csv(csv.as_bytes()).unwrap();
        assert!(tensor.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_csv_header_row_is_skipped() {
        let header: String = (0..FEATURES)
            .map(|i| format!("sensor_{i}"))
            .collect::<Vec<_>>()
            .join(",");
        let csv = format!("{header}\n{}", csv_of(TIME_STEPS, FEATURES, 3.0));
        let tensor = tensor_from_csv(csv.as_bytes()).unwrap();
        assert_eq!(tensor.shape(), &[1, TIME_STEPS, FEATURES]);
        assert_eq!(tensor[[0, 0, 0]], 3.0);
    }

    #[test]
    fn test_csv_non_numeric_data_row_fails() {
        let mut csv = csv_of(TIME_STEPS, FEATURES, 0.0);
        csv.push_str("\nbad");
        assert!(tensor_from_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_csv_empty_file_is_column_mismatch() {
        match tensor_from_csv(b"").unwrap_err() {
            InferError::ColumnCountMismatch { actual, .. } => assert_eq!(actual, 0),
            other => panic!("expected ColumnCountMismatch, got {other:?}"),
        }
    }
}
