use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::model::{CleanedRecord, UNKNOWN_JOURNAL};

pub const TOP_JOURNALS: usize = 15;
pub const TOP_TITLE_WORDS: usize = 20;
pub const TOP_SOURCES: usize = 10;

/// Words never counted in title frequencies.
pub const STOPWORDS: [&str; 20] = [
    "the", "and", "of", "in", "to", "a", "for", "with", "on", "by", "as", "an", "from", "that",
    "is", "are", "this", "which", "be", "at",
];

/// A ranked `(key, count)` list, highest count first.
pub type Counts<K> = Vec<(K, usize)>;

// Lazy-initialized regex for title words
static WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| Regex::new(r"\b[a-z]{3,15}\b").expect("valid word regex"))
}

// ---------------------------------------------------------------------------
// Counting helpers
// ---------------------------------------------------------------------------

/// Count keys, remembering the order in which each was first seen.
fn count_first_seen<K, I>(keys: I) -> Counts<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Counts<K> = Vec::new();
    for key in keys {
        match index.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts
}

/// Sort descending by count and keep the first `n`.
///
/// The sort is stable, so equal counts stay in first-seen order.
pub fn top_n<K>(mut counts: Counts<K>, n: usize) -> Counts<K> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Publications per year, ascending by year.
pub fn year_histogram<'a>(records: impl IntoIterator<Item = &'a CleanedRecord>) -> Counts<i32> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for record in records {
        *by_year.entry(record.year).or_default() += 1;
    }
    by_year.into_iter().collect()
}

/// The most frequent journals, excluding the unknown-journal sentinel.
pub fn top_journals<'a>(records: impl IntoIterator<Item = &'a CleanedRecord>) -> Counts<String> {
    let journals = records
        .into_iter()
        .map(|r| r.journal.as_str())
        .filter(|j| *j != UNKNOWN_JOURNAL);
    top_n(count_first_seen(journals), TOP_JOURNALS)
        .into_iter()
        .map(|(j, c)| (j.to_string(), c))
        .collect()
}

/// Lowercase words of 3 to 15 letters across all titles, stopwords removed.
pub fn title_word_frequencies<'a>(
    records: impl IntoIterator<Item = &'a CleanedRecord>,
) -> Counts<String> {
    let mut words: Vec<String> = Vec::new();
    for record in records {
        let title = record.title.to_lowercase();
        words.extend(
            word_regex()
                .find_iter(&title)
                .map(|m| m.as_str())
                .filter(|w| !STOPWORDS.contains(w))
                .map(str::to_string),
        );
    }
    top_n(count_first_seen(words), TOP_TITLE_WORDS)
}

/// Per-record abstract word counts, in table order.
pub fn abstract_lengths<'a>(records: impl IntoIterator<Item = &'a CleanedRecord>) -> Vec<usize> {
    records.into_iter().map(|r| r.abstract_word_count).collect()
}

/// The most frequent `source_x` values. Records without a source are skipped.
pub fn source_distribution<'a>(
    records: impl IntoIterator<Item = &'a CleanedRecord>,
) -> Counts<String> {
    let sources = records.into_iter().filter_map(|r| r.source_x.as_deref());
    top_n(count_first_seen(sources), TOP_SOURCES)
        .into_iter()
        .map(|(s, c)| (s.to_string(), c))
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregates – all five views together
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    pub year_counts: Counts<i32>,
    pub top_journals: Counts<String>,
    pub title_words: Counts<String>,
    pub abstract_lengths: Vec<usize>,
    pub source_counts: Counts<String>,
}

impl Aggregates {
    /// Compute every view over the given records (a full table or a filtered
    /// subset). Views are independent of each other.
    pub fn compute<'a>(records: impl IntoIterator<Item = &'a CleanedRecord>) -> Self {
        let records: Vec<&CleanedRecord> = records.into_iter().collect();
        Self {
            year_counts: year_histogram(records.iter().copied()),
            top_journals: top_journals(records.iter().copied()),
            title_words: title_word_frequencies(records.iter().copied()),
            abstract_lengths: abstract_lengths(records.iter().copied()),
            source_counts: source_distribution(records.iter().copied()),
        }
    }
}
