use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use super::model::{CleanedRecord, CleanedTable};
use super::Analysis;

/// Default lower bound of the year slider.
pub const DEFAULT_FIRST_YEAR: i32 = 2020;
/// Default upper bound of the abstract-length slider.
pub const DEFAULT_MAX_ABSTRACT_WORDS: usize = 300;
/// How many top journals are preselected.
pub const DEFAULT_JOURNAL_SELECTION: usize = 3;

// ---------------------------------------------------------------------------
// Filter predicate
// ---------------------------------------------------------------------------

/// Dashboard selection over the cleaned table.
///
/// An empty `journals` set means "no journal filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    pub years: RangeInclusive<i32>,
    pub journals: BTreeSet<String>,
    pub abstract_words: RangeInclusive<usize>,
}

impl RecordFilter {
    /// A filter that lets every record through.
    pub fn pass_all() -> Self {
        Self {
            years: i32::MIN..=i32::MAX,
            journals: BTreeSet::new(),
            abstract_words: 0..=usize::MAX,
        }
    }

    /// Initial selection for a freshly loaded analysis: years from 2020 (or
    /// the first year, if later) to the last year, the three most frequent
    /// journals, and abstracts of up to 300 words clamped to the
    /// minimum..95th-percentile slider bounds.
    pub fn initial(analysis: &Analysis) -> Self {
        let (first_year, last_year) = analysis
            .summary
            .year_range
            .unwrap_or((DEFAULT_FIRST_YEAR, DEFAULT_FIRST_YEAR));
        let year_start = DEFAULT_FIRST_YEAR.clamp(first_year, last_year);

        let journals = analysis
            .aggregates
            .top_journals
            .iter()
            .take(DEFAULT_JOURNAL_SELECTION)
            .map(|(j, _)| j.clone())
            .collect();

        let (lo, hi) = abstract_bounds(analysis);
        Self {
            years: year_start..=last_year,
            journals,
            abstract_words: lo..=DEFAULT_MAX_ABSTRACT_WORDS.clamp(lo, hi),
        }
    }

    /// Whether a single record passes every active constraint.
    pub fn matches(&self, record: &CleanedRecord) -> bool {
        self.years.contains(&record.year)
            && self.abstract_words.contains(&record.abstract_word_count)
            && (self.journals.is_empty() || self.journals.contains(&record.journal))
    }
}

/// Slider bounds for abstract length: minimum to 95th percentile, which keeps
/// extreme outliers off the slider.
pub fn abstract_bounds(analysis: &Analysis) -> (usize, usize) {
    let lo = analysis.summary.min_abstract_words;
    let hi = (analysis.summary.p95_abstract_words.floor() as usize).max(lo);
    (lo, hi)
}

/// Return indices of records that pass the filter, in table order.
pub fn filtered_indices(table: &CleanedTable, filter: &RecordFilter) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches(record))
        .map(|(i, _)| i)
        .collect()
}
