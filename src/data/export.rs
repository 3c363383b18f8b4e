use std::io::Write;

use serde::Serialize;

use super::model::CleanedRecord;
use crate::error::Result;

/// File name offered when saving a filtered subset.
pub const DEFAULT_EXPORT_NAME: &str = "filtered_papers.csv";

/// One row of the filtered-subset export.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    title: &'a str,
    journal: &'a str,
    year: i32,
    abstract_word_count: usize,
}

/// Write records as comma-delimited text with the header
/// `title,journal,year,abstract_word_count`.
///
/// Returns the number of rows written.
pub fn write_records_csv<'a, W: Write>(
    writer: W,
    records: impl IntoIterator<Item = &'a CleanedRecord>,
) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut rows = 0;
    for record in records {
        writer.serialize(ExportRow {
            title: &record.title,
            journal: &record.journal,
            year: record.year,
            abstract_word_count: record.abstract_word_count,
        })?;
        rows += 1;
    }
    if rows == 0 {
        writer.write_record(["title", "journal", "year", "abstract_word_count"])?;
    }
    writer.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_records_csv() {
        let record = CleanedRecord {
            cord_uid: Some("x1".to_string()),
            title: "Masks, distance, and spread".to_string(),
            abstract_text: Some("four words right here".to_string()),
            journal: "Nature".to_string(),
            year: 2021,
            abstract_word_count: 4,
            source_x: Some("PMC".to_string()),
            authors: None,
            url: None,
        };
        let mut out = Vec::new();
        let rows = write_records_csv(&mut out, [&record]).unwrap();
        assert_eq!(rows, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "title,journal,year,abstract_word_count\n\"Masks, distance, and spread\",Nature,2021,4\n"
        );
    }

    #[test]
    fn test_empty_export_keeps_header() {
        let mut out = Vec::new();
        let rows = write_records_csv(&mut out, std::iter::empty()).unwrap();
        assert_eq!(rows, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "title,journal,year,abstract_word_count\n");
    }
}
