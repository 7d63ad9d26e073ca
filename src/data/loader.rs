use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    ShipmentDataset, ShipmentRecord, CUSTOMER_RATING, MODE_OF_SHIPMENT, REQUIRED_COLUMNS,
    WAREHOUSE_BLOCK, WEIGHT_IN_GMS,
};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a shipment dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming at least the four required columns
/// * `.json`    – `[{ "Warehouse_block": "A", "Mode_of_Shipment": "Ship", ... }, ...]`
/// * `.parquet` – Arrow schema with the four required columns
///
/// Columns beyond the required four are ignored.
pub fn load_file(path: &Path) -> Result<ShipmentDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DashboardError::data_source(
            path,
            format!("unsupported file extension: .{other}"),
        )),
    }?;

    log::info!("Loaded {} shipment records from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

fn parse_rating(s: &str) -> std::result::Result<i64, String> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    // Ratings exported through a float column arrive as "4.0".
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        _ => Err(format!("'{s}' is not an integer rating")),
    }
}

fn parse_weight(s: &str) -> std::result::Result<f64, String> {
    let s = s.trim();
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(f),
        _ => Err(format!("'{s}' is not a numeric weight")),
    }
}

fn cell_error(path: &Path, row: usize, column: &str, message: &str) -> DashboardError {
    DashboardError::data_source(path, format!("row {row}, column '{column}': {message}"))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one shipment per line.
fn load_csv(path: &Path) -> Result<ShipmentDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DashboardError::data_source(path, format!("opening CSV: {e}")))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DashboardError::data_source(path, format!("reading CSV headers: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut idx = [0usize; 4];
    for (slot, column) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DashboardError::Schema {
                path: path.to_path_buf(),
                column,
            })?;
    }
    let [block_idx, mode_idx, rating_idx, weight_idx] = idx;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| DashboardError::data_source(path, format!("CSV row {row_no}: {e}")))?;
        let field = |i: usize| record.get(i).unwrap_or("");

        let customer_rating = parse_rating(field(rating_idx))
            .map_err(|m| cell_error(path, row_no, CUSTOMER_RATING, &m))?;
        let weight_in_gms = parse_weight(field(weight_idx))
            .map_err(|m| cell_error(path, row_no, WEIGHT_IN_GMS, &m))?;

        records.push(ShipmentRecord {
            warehouse_block: field(block_idx).to_string(),
            mode_of_shipment: field(mode_idx).to_string(),
            customer_rating,
            weight_in_gms,
        });
    }

    Ok(ShipmentDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Warehouse_block": "D", "Mode_of_Shipment": "Flight",
///     "Customer_rating": 2, "Weight_in_gms": 1233 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<ShipmentDataset> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| DashboardError::data_source(path, format!("reading JSON file: {e}")))?;
    let root: JsonValue = serde_json::from_str(&text)
        .map_err(|e| DashboardError::data_source(path, format!("parsing JSON: {e}")))?;

    let rows = root
        .as_array()
        .ok_or_else(|| DashboardError::data_source(path, "expected top-level JSON array"))?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| DashboardError::data_source(path, format!("row {i} is not a JSON object")))?;

        let mut cells: [&JsonValue; 4] = [&JsonValue::Null; 4];
        for (cell, column) in cells.iter_mut().zip(REQUIRED_COLUMNS) {
            *cell = obj.get(column).ok_or_else(|| DashboardError::Schema {
                path: path.to_path_buf(),
                column,
            })?;
        }
        let [block, mode, rating, weight] = cells;

        records.push(ShipmentRecord {
            warehouse_block: json_to_label(block)
                .ok_or_else(|| cell_error(path, i, WAREHOUSE_BLOCK, "expected a label"))?,
            mode_of_shipment: json_to_label(mode)
                .ok_or_else(|| cell_error(path, i, MODE_OF_SHIPMENT, "expected a label"))?,
            customer_rating: json_to_rating(rating)
                .map_err(|m| cell_error(path, i, CUSTOMER_RATING, &m))?,
            weight_in_gms: json_to_weight(weight)
                .map_err(|m| cell_error(path, i, WEIGHT_IN_GMS, &m))?,
        });
    }

    Ok(ShipmentDataset::from_records(records))
}

fn json_to_label(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => Some(s.trim().to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_to_rating(val: &JsonValue) -> std::result::Result<i64, String> {
    match val {
        JsonValue::Number(n) => parse_rating(&n.to_string()),
        JsonValue::String(s) => parse_rating(s),
        other => Err(format!("{other} is not an integer rating")),
    }
}

fn json_to_weight(val: &JsonValue) -> std::result::Result<f64, String> {
    match val {
        JsonValue::Number(n) => n.as_f64().ok_or_else(|| format!("{n} is not a numeric weight")),
        JsonValue::String(s) => parse_weight(s),
        other => Err(format!("{other} is not a numeric weight")),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing shipment rows.
///
/// Expected schema:
/// - `Warehouse_block`, `Mode_of_Shipment`: Utf8 or LargeUtf8
/// - `Customer_rating`: Int32 or Int64
/// - `Weight_in_gms`: Int32, Int64, Float32 or Float64
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<ShipmentDataset> {
    let file = std::fs::File::open(path)
        .map_err(|e| DashboardError::data_source(path, format!("opening parquet file: {e}")))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DashboardError::data_source(path, format!("reading parquet metadata: {e}")))?;

    // Check the schema up front so an empty file still reports missing columns.
    let schema = builder.schema().clone();
    for column in REQUIRED_COLUMNS {
        if schema.index_of(column).is_err() {
            return Err(DashboardError::Schema {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let reader = builder
        .build()
        .map_err(|e| DashboardError::data_source(path, format!("building parquet reader: {e}")))?;

    let mut records = Vec::new();
    let mut row_offset = 0usize;

    for batch_result in reader {
        let batch = batch_result
            .map_err(|e| DashboardError::data_source(path, format!("reading parquet record batch: {e}")))?;

        let block_col = batch_column(&batch, path, WAREHOUSE_BLOCK)?;
        let mode_col = batch_column(&batch, path, MODE_OF_SHIPMENT)?;
        let rating_col = batch_column(&batch, path, CUSTOMER_RATING)?;
        let weight_col = batch_column(&batch, path, WEIGHT_IN_GMS)?;

        for row in 0..batch.num_rows() {
            let row_no = row_offset + row;
            records.push(ShipmentRecord {
                warehouse_block: extract_label(block_col, row)
                    .map_err(|m| cell_error(path, row_no, WAREHOUSE_BLOCK, &m))?,
                mode_of_shipment: extract_label(mode_col, row)
                    .map_err(|m| cell_error(path, row_no, MODE_OF_SHIPMENT, &m))?,
                customer_rating: extract_rating(rating_col, row)
                    .map_err(|m| cell_error(path, row_no, CUSTOMER_RATING, &m))?,
                weight_in_gms: extract_weight(weight_col, row)
                    .map_err(|m| cell_error(path, row_no, WEIGHT_IN_GMS, &m))?,
            });
        }
        row_offset += batch.num_rows();
    }

    Ok(ShipmentDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn batch_column<'a>(batch: &'a RecordBatch, path: &Path, column: &'static str) -> Result<&'a ArrayRef> {
    batch.column_by_name(column).ok_or_else(|| DashboardError::Schema {
        path: path.to_path_buf(),
        column,
    })
}

fn extract_label(col: &ArrayRef, row: usize) -> std::result::Result<String, String> {
    if col.is_null(row) {
        return Err("null value".into());
    }
    match col.data_type() {
        DataType::Utf8 => col.as_string_opt::<i32>().map(|a| a.value(row).trim().to_string()),
        DataType::LargeUtf8 => col.as_string_opt::<i64>().map(|a| a.value(row).trim().to_string()),
        _ => None,
    }
    .ok_or_else(|| format!("expected a string column, got {:?}", col.data_type()))
}

fn extract_rating(col: &ArrayRef, row: usize) -> std::result::Result<i64, String> {
    if col.is_null(row) {
        return Err("null value".into());
    }
    match col.data_type() {
        DataType::Int32 => col.as_primitive_opt::<Int32Type>().map(|a| a.value(row) as i64),
        DataType::Int64 => col.as_primitive_opt::<Int64Type>().map(|a| a.value(row)),
        _ => None,
    }
    .ok_or_else(|| format!("expected an integer column, got {:?}", col.data_type()))
}

fn extract_weight(col: &ArrayRef, row: usize) -> std::result::Result<f64, String> {
    if col.is_null(row) {
        return Err("null value".into());
    }
    match col.data_type() {
        DataType::Float64 => col.as_primitive_opt::<Float64Type>().map(|a| a.value(row)),
        DataType::Float32 => col.as_primitive_opt::<Float32Type>().map(|a| a.value(row) as f64),
        DataType::Int64 => col.as_primitive_opt::<Int64Type>().map(|a| a.value(row) as f64),
        DataType::Int32 => col.as_primitive_opt::<Int32Type>().map(|a| a.value(row) as f64),
        _ => None,
    }
    .ok_or_else(|| format!("expected a numeric column, got {:?}", col.data_type()))
    .and_then(|w| {
        if w.is_finite() {
            Ok(w)
        } else {
            Err(format!("'{w}' is not a numeric weight"))
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const CSV: &str = "\
ID,Warehouse_block,Mode_of_Shipment,Customer_care_calls,Customer_rating,Weight_in_gms
1,D,Flight,4,2,1233
2,F,Flight,4,5,3088
3,A,Ship, 2 ,2, 1177.5
";

    fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn expected() -> ShipmentDataset {
        let rows = [("D", "Flight", 2, 1233.0), ("F", "Flight", 5, 3088.0), ("A", "Ship", 2, 1177.5)];
        ShipmentDataset::from_records(rows.iter().map(|&(b, m, r, w)| ShipmentRecord {
            warehouse_block: b.into(),
            mode_of_shipment: m.into(),
            customer_rating: r,
            weight_in_gms: w,
        }))
    }

    #[test]
    fn csv_loads_required_columns_and_ignores_others() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "data.csv", CSV);
        assert_eq!(load_file(&path).unwrap(), expected());
    }

    #[test]
    fn json_matches_csv() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"[
            {"ID": 1, "Warehouse_block": "D", "Mode_of_Shipment": "Flight", "Customer_rating": 2, "Weight_in_gms": 1233},
            {"ID": 2, "Warehouse_block": "F", "Mode_of_Shipment": "Flight", "Customer_rating": 5.0, "Weight_in_gms": 3088},
            {"ID": 3, "Warehouse_block": "A", "Mode_of_Shipment": "Ship", "Customer_rating": "2", "Weight_in_gms": 1177.5}
        ]"#;
        let path = write(dir.path(), "data.json", json);
        assert_eq!(load_file(&path).unwrap(), expected());
    }

    /// Three rows matching [`expected`], with the given weights.
    fn write_parquet(path: &Path, weights: Vec<f64>) {
        let schema = Arc::new(Schema::new(vec![
            Field::new(WAREHOUSE_BLOCK, DataType::Utf8, false),
            Field::new(MODE_OF_SHIPMENT, DataType::Utf8, false),
            Field::new(CUSTOMER_RATING, DataType::Int64, false),
            Field::new(WEIGHT_IN_GMS, DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["D", "F", "A"])),
                Arc::new(StringArray::from(vec!["Flight", "Flight", "Ship"])),
                Arc::new(Int64Array::from(vec![2, 5, 2])),
                Arc::new(Float64Array::from(weights)),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn parquet_matches_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.parquet");
        write_parquet(&path, vec![1233.0, 3088.0, 1177.5]);
        assert_eq!(load_file(&path).unwrap(), expected());
    }

    #[test]
    fn parquet_rejects_non_finite_weights() {
        let dir = tempfile::tempdir().unwrap();
        for (name, bad) in [("nan", f64::NAN), ("inf", f64::INFINITY), ("neg_inf", f64::NEG_INFINITY)] {
            let path = dir.path().join(format!("{name}.parquet"));
            write_parquet(&path, vec![1000.0, 2000.0, bad]);

            let err = load_file(&path).unwrap_err();
            let msg = err.to_string();
            assert!(matches!(err, DashboardError::DataSource { .. }), "{name}: {msg}");
            assert!(msg.contains("row 2"), "{msg}");
            assert!(msg.contains(WEIGHT_IN_GMS), "{msg}");
        }
    }

    #[test]
    fn csv_rejects_non_finite_weights() {
        let dir = tempfile::tempdir().unwrap();
        for bad in ["NaN", "inf", "-inf"] {
            let csv = format!(
                "Warehouse_block,Mode_of_Shipment,Customer_rating,Weight_in_gms\nA,Ship,3,1000\nB,Road,2,{bad}\n"
            );
            let path = write(dir.path(), "data.csv", &csv);
            let err = load_file(&path).unwrap_err();
            assert!(matches!(err, DashboardError::DataSource { .. }), "{bad}");
            assert!(err.to_string().contains("not a numeric weight"));
        }
    }

    #[test]
    fn missing_column_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "data.csv",
            "Warehouse_block,Mode_of_Shipment,Weight_in_gms\nA,Ship,1000\n",
        );
        match load_file(&path) {
            Err(DashboardError::Schema { column, .. }) => assert_eq!(column, CUSTOMER_RATING),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_data_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::DataSource { .. }));
    }

    #[test]
    fn unsupported_extension_is_data_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "data.xlsx", "");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn bad_rating_names_row_and_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "data.csv",
            "Warehouse_block,Mode_of_Shipment,Customer_rating,Weight_in_gms\nA,Ship,high,1000\n",
        );
        let err = load_file(&path).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, DashboardError::DataSource { .. }));
        assert!(msg.contains("row 0"));
        assert!(msg.contains(CUSTOMER_RATING));
    }

    #[test]
    fn header_only_csv_is_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "data.csv",
            "Warehouse_block,Mode_of_Shipment,Customer_rating,Weight_in_gms\n",
        );
        assert!(load_file(&path).unwrap().is_empty());
    }
}
