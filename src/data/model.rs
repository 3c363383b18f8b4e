/// Columns the cleaner cannot work without.
pub const REQUIRED_COLUMNS: [&str; 4] = ["title", "abstract", "journal", "publish_time"];

/// Placeholder journal for records whose journal is absent or blank.
pub const UNKNOWN_JOURNAL: &str = "Unknown";

/// Cell values treated as missing when reading text formats, on top of the
/// empty string.
pub const NA_TOKENS: [&str; 18] = [
    "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "<NA>", "#N/A", "n/a", "-NaN", "-nan",
    "#NA", "-1.#IND", "1.#IND", "-1.#QNAN", "1.#QNAN", "#N/A N/A",
];

/// Interpret a text cell: empty or NA-like cells are absent, anything else is
/// kept verbatim (including surrounding whitespace).
pub fn cell_value(raw: &str) -> Option<String> {
    if raw.is_empty() || NA_TOKENS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one row as read from the input file
// ---------------------------------------------------------------------------

/// A single paper record before cleaning. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub cord_uid: Option<String>,
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub journal: Option<String>,
    pub publish_time: Option<String>,
    pub source_x: Option<String>,
    pub authors: Option<String>,
    pub url: Option<String>,
}

impl RawRecord {
    /// Assign a cell by its column name. Unrecognised columns are ignored.
    pub fn set(&mut self, column: &str, value: Option<String>) {
        let slot = match column {
            "cord_uid" => &mut self.cord_uid,
            "title" => &mut self.title,
            "abstract" => &mut self.abstract_text,
            "journal" => &mut self.journal,
            "publish_time" => &mut self.publish_time,
            "source_x" => &mut self.source_x,
            "authors" => &mut self.authors,
            "url" => &mut self.url,
            _ => return,
        };
        *slot = value;
    }
}

// ---------------------------------------------------------------------------
// RawTable – the complete loaded file
// ---------------------------------------------------------------------------

/// All rows of an input file together with its header columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub records: Vec<RawRecord>,
    /// Column names in file order.
    pub columns: Vec<String>,
}

impl RawTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CleanedRecord / CleanedTable
// ---------------------------------------------------------------------------

/// A record that survived cleaning.
///
/// `year` is always greater than 2000, `journal` is never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedRecord {
    pub cord_uid: Option<String>,
    pub title: String,
    pub abstract_text: Option<String>,
    pub journal: String,
    pub year: i32,
    pub abstract_word_count: usize,
    pub source_x: Option<String>,
    pub authors: Option<String>,
    pub url: Option<String>,
}

impl CleanedRecord {
    pub fn has_abstract(&self) -> bool {
        self.abstract_text.is_some()
    }
}

/// The cleaned dataset plus counters for the rows that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedTable {
    pub records: Vec<CleanedRecord>,
    /// Whether the input carried a `source_x` column at all.
    pub has_source: bool,
    pub dropped_missing_title: usize,
    pub dropped_missing_year: usize,
    pub dropped_out_of_range: usize,
}

impl CleanedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
