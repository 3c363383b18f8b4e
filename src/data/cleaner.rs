use std::sync::OnceLock;

use regex::Regex;

use super::model::{
    CleanedRecord, CleanedTable, RawRecord, RawTable, REQUIRED_COLUMNS, UNKNOWN_JOURNAL,
};
use crate::error::{Error, Result};

/// Records published in or before this year are excluded.
pub const MIN_YEAR_EXCLUSIVE: i32 = 2000;

// Lazy-initialized regex for the first four-digit run
static YEAR_REGEX: OnceLock<Regex> = OnceLock::new();

fn year_regex() -> &'static Regex {
    YEAR_REGEX.get_or_init(|| Regex::new(r"[0-9]{4}").expect("valid year regex"))
}

/// Extract a year from a free-form date: the first four consecutive digits.
///
/// This is a heuristic. Any four-digit run counts, so `"id 12345"` yields
/// `1234`.
pub fn extract_year(publish_time: Option<&str>) -> Option<i32> {
    let text = publish_time?;
    let m = year_regex().find(text)?;
    m.as_str().parse().ok()
}

/// Number of whitespace-delimited tokens, 0 for an absent abstract.
pub fn abstract_word_count(abstract_text: Option<&str>) -> usize {
    abstract_text.map_or(0, |text| text.split_whitespace().count())
}

/// Trim a journal name, substituting [`UNKNOWN_JOURNAL`] when absent or blank.
pub fn normalize_journal(journal: Option<&str>) -> String {
    match journal.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNKNOWN_JOURNAL.to_string(),
    }
}

/// Why a raw record did not make it into the cleaned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    MissingTitle,
    MissingYear,
    YearOutOfRange(i32),
}

/// Clean a single record, or report why it is dropped.
pub fn clean_record(raw: &RawRecord) -> std::result::Result<CleanedRecord, DropReason> {
    let title = raw.title.clone().ok_or(DropReason::MissingTitle)?;
    let year = extract_year(raw.publish_time.as_deref()).ok_or(DropReason::MissingYear)?;
    if year <= MIN_YEAR_EXCLUSIVE {
        return Err(DropReason::YearOutOfRange(year));
    }

    Ok(CleanedRecord {
        cord_uid: raw.cord_uid.clone(),
        title,
        abstract_text: raw.abstract_text.clone(),
        journal: normalize_journal(raw.journal.as_deref()),
        year,
        abstract_word_count: abstract_word_count(raw.abstract_text.as_deref()),
        source_x: raw.source_x.clone(),
        authors: raw.authors.clone(),
        url: raw.url.clone(),
    })
}

/// Produce the cleaned table from a raw table.
///
/// Fails only when a required column is missing from the input; every
/// per-record problem is resolved by dropping the record or substituting a
/// fallback value.
pub fn clean(raw: &RawTable) -> Result<CleanedTable> {
    if let Some(column) = REQUIRED_COLUMNS.iter().find(|c| !raw.has_column(c)) {
        return Err(Error::MissingColumn {
            column: column.to_string(),
        });
    }

    let has_source = raw.has_column("source_x");
    if !has_source {
        log::warn!("Input has no 'source_x' column; source distribution will be empty");
    }

    let mut table = CleanedTable {
        records: Vec::with_capacity(raw.len()),
        has_source,
        ..Default::default()
    };

    for record in &raw.records {
        match clean_record(record) {
            Ok(cleaned) => table.records.push(cleaned),
            Err(DropReason::MissingTitle) => table.dropped_missing_title += 1,
            Err(DropReason::MissingYear) => table.dropped_missing_year += 1,
            Err(DropReason::YearOutOfRange(_)) => table.dropped_out_of_range += 1,
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: Option<&str>, publish_time: Option<&str>) -> RawRecord {
        RawRecord {
            title: title.map(String::from),
            publish_time: publish_time.map(String::from),
            ..Default::default()
        }
    }

    fn table(records: Vec<RawRecord>) -> RawTable {
        RawTable {
            records,
            columns: ["title", "abstract", "journal", "publish_time", "source_x"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year(Some("2021-03-15")), Some(2021));
        assert_eq!(extract_year(Some("15 March 2020")), Some(2020));
        assert_eq!(extract_year(Some("20210315")), Some(2021));
        assert_eq!(extract_year(Some("unknown date")), None);
        assert_eq!(extract_year(Some("03/15/21")), None);
        assert_eq!(extract_year(None), None);
    }

    #[test]
    fn test_extract_year_takes_first_run() {
        // Heuristic: an identifier before the date wins.
        assert_eq!(extract_year(Some("ref 1987, published 2021")), Some(1987));
    }

    #[test]
    fn test_extract_year_ascii_digits_only() {
        assert_eq!(extract_year(Some("２０２１-03-15")), None);
        assert_eq!(extract_year(Some("２０２１, 2022")), Some(2022));
    }

    #[test]
    fn test_abstract_word_count() {
        assert_eq!(abstract_word_count(None), 0);
        assert_eq!(abstract_word_count(Some("   ")), 0);
        assert_eq!(abstract_word_count(Some("one  two\tthree\nfour")), 4);
    }

    #[test]
    fn test_normalize_journal() {
        assert_eq!(normalize_journal(Some("  Nature  ")), "Nature");
        assert_eq!(normalize_journal(None), UNKNOWN_JOURNAL);
        assert_eq!(normalize_journal(Some("   ")), UNKNOWN_JOURNAL);
    }

    #[test]
    fn test_clean_drops_unusable_rows() {
        let input = table(vec![
            raw(Some("Kept"), Some("2021-03-15")),
            raw(None, Some("2021-03-15")),
            raw(Some("No date"), Some("unknown date")),
            raw(Some("No date either"), None),
            raw(Some("Too old"), Some("1999-01-01")),
            raw(Some("Boundary"), Some("2000-12-31")),
        ]);
        let cleaned = clean(&input).unwrap();

        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.records[0].title, "Kept");
        assert_eq!(cleaned.records[0].year, 2021);
        assert_eq!(cleaned.dropped_missing_title, 1);
        assert_eq!(cleaned.dropped_missing_year, 2);
        assert_eq!(cleaned.dropped_out_of_range, 2);
    }

    #[test]
    fn test_clean_fills_fields() {
        let mut record = raw(Some("Paper"), Some("2022"));
        record.journal = Some("  Nature  ".to_string());
        record.abstract_text = Some("A short abstract here".to_string());
        record.source_x = Some("PMC".to_string());

        let cleaned = clean(&table(vec![record, raw(Some("Other"), Some("2021"))])).unwrap();
        assert_eq!(cleaned.records[0].journal, "Nature");
        assert_eq!(cleaned.records[0].abstract_word_count, 4);
        assert_eq!(cleaned.records[0].source_x.as_deref(), Some("PMC"));
        assert_eq!(cleaned.records[1].journal, UNKNOWN_JOURNAL);
        assert_eq!(cleaned.records[1].abstract_word_count, 0);
        assert_eq!(cleaned.records[1].source_x, None);
    }

    #[test]
    fn test_missing_required_column() {
        let input = RawTable {
            records: Vec::new(),
            columns: vec!["title".to_string(), "abstract".to_string(), "journal".to_string()],
        };
        match clean(&input) {
            Err(Error::MissingColumn { column }) => assert_eq!(column, "publish_time"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_source_column_is_optional() {
        let input = RawTable {
            records: vec![raw(Some("Paper"), Some("2021"))],
            columns: REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect(),
        };
        let cleaned = clean(&input).unwrap();
        assert!(!cleaned.has_source);
        assert_eq!(cleaned.len(), 1);
    }
}
