use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use arrow::array::{Array, AsArray};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{cell_value, RawRecord, RawTable};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a metadata table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.tsv` / `.tab`   – tab-delimited text with a header row
/// * `.json`           – `[{ "title": "...", "journal": "...", ... }, ...]`
/// * `.parquet` / `.pq` – one row per record, scalar columns
/// * anything else     – comma-delimited text with a header row
///
/// No type coercion happens here: every cell comes back as optional text.
pub fn load_file(path: &Path) -> Result<RawTable> {
    if !path.is_file() {
        return Err(Error::MissingInput {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "tsv" | "tab" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        _ => load_delimited(path, b',')?,
    };

    log::debug!(
        "Read {} rows from {} ({} columns)",
        table.len(),
        path.display(),
        table.columns.len()
    );
    Ok(table)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::from_open(e, path))
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

fn load_delimited(path: &Path, delimiter: u8) -> Result<RawTable> {
    read_delimited(BufReader::new(open(path)?), delimiter)
}

/// Parse delimited text with a header row. Every row must have as many
/// fields as the header.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let mut record = RawRecord::default();
        for (column, value) in columns.iter().zip(row.iter()) {
            record.set(column, cell_value(value));
        }
        records.push(record);
    }

    Ok(RawTable { records, columns })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, as written by
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "title": "COVID and the Immune Response", "journal": "Nature", "publish_time": "2021-03-15" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<RawTable> {
    read_json(BufReader::new(open(path)?))
}

pub fn read_json<R: Read>(reader: R) -> Result<RawTable> {
    let root: JsonValue = serde_json::from_reader(reader)?;
    let rows = root
        .as_array()
        .ok_or_else(|| Error::InvalidFile("expected a top-level JSON array".to_string()))?;

    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| Error::InvalidFile(format!("row {i} is not a JSON object")))?;

        let mut record = RawRecord::default();
        for (key, value) in obj {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
            record.set(key, json_to_text(value));
        }
        records.push(record);
    }

    Ok(RawTable { records, columns })
}

fn json_to_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => cell_value(s),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of paper metadata.
///
/// String columns are read as-is; any other scalar column (dates, numbers,
/// booleans) is rendered to text. Null cells are absent.
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;

        for row in 0..batch.num_rows() {
            let mut record = RawRecord::default();
            for (col_idx, name) in columns.iter().enumerate() {
                let value = extract_text(batch.column(col_idx).as_ref(), row)?;
                record.set(name, value);
            }
            records.push(record);
        }
    }

    Ok(RawTable { records, columns })
}

/// Extract a single cell from an Arrow column as optional text.
fn extract_text(col: &dyn Array, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let text = match col.data_type() {
        DataType::Utf8 => cell_value(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => cell_value(col.as_string::<i64>().value(row)),
        _ => cell_value(&array_value_to_string(col, row)?),
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_delimited_optional_cells() {
        let data = "cord_uid,title,abstract,journal,publish_time,source_x\n\
                    a1,First paper,,  Nature  ,2021-03-15,PMC\n\
                    a2,,Some text,NaN,2020,\n";
        let table = read_delimited(data.as_bytes(), b',').unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.has_column("source_x"));
        assert!(!table.has_column("url"));

        let first = &table.records[0];
        assert_eq!(first.title.as_deref(), Some("First paper"));
        assert_eq!(first.abstract_text, None);
        assert_eq!(first.journal.as_deref(), Some("  Nature  "));

        let second = &table.records[1];
        assert_eq!(second.title, None);
        assert_eq!(second.journal, None);
        assert_eq!(second.source_x, None);
    }

    #[test]
    fn test_read_delimited_tabs() {
        let data = "title\tpublish_time\nA\t2022\n";
        let table = read_delimited(data.as_bytes(), b'\t').unwrap();
        assert_eq!(table.records[0].publish_time.as_deref(), Some("2022"));
    }

    #[test]
    fn test_ragged_rows_are_a_parse_error() {
        let data = "title,journal\nA,B,C\n";
        let err = read_delimited(data.as_bytes(), b',').unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn test_read_json_records() {
        let data = r#"[
            {"title": "A", "publish_time": 2021, "journal": null},
            {"title": "B", "source_x": "WHO", "abstract": ""}
        ]"#;
        let table = read_json(data.as_bytes()).unwrap();
        assert_eq!(table.columns.len(), 5);
        for col in ["title", "publish_time", "journal", "source_x", "abstract"] {
            assert!(table.has_column(col), "missing {col}");
        }
        assert_eq!(table.records[0].publish_time.as_deref(), Some("2021"));
        assert_eq!(table.records[0].journal, None);
        assert_eq!(table.records[1].abstract_text, None);
    }

    #[test]
    fn test_read_json_rejects_non_array() {
        let err = read_json(r#"{"title": "A"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidFile(_)));
    }

    #[test]
    fn test_extract_text_na_in_dictionary_column() {
        use arrow::array::DictionaryArray;
        use arrow::datatypes::Int32Type;

        let col: DictionaryArray<Int32Type> = vec!["Nature", "NA", ""].into_iter().collect();
        assert_eq!(extract_text(&col, 0).unwrap().as_deref(), Some("Nature"));
        assert_eq!(extract_text(&col, 1).unwrap(), None);
        assert_eq!(extract_text(&col, 2).unwrap(), None);
    }

    #[test]
    fn test_directory_is_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(dir.path()).unwrap_err();
        assert!(matches!(err, Error::MissingInput { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_file(Path::new("/definitely/not/here/metadata.csv")).unwrap_err();
        assert!(matches!(err, Error::MissingInput { .. }));
    }
}
