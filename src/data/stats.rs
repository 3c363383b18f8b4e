use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::model::CleanedRecord;

/// Headline numbers for a set of cleaned records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_papers: usize,
    /// Earliest and latest year, `None` for an empty set.
    pub year_range: Option<(i32, i32)>,
    /// Distinct journals, the unknown-journal sentinel included.
    pub unique_journals: usize,
    pub papers_with_abstracts: usize,
    pub most_common_journal: Option<String>,
    pub mean_abstract_words: f64,
    pub min_abstract_words: usize,
    pub p95_abstract_words: f64,
}

impl DatasetSummary {
    pub fn compute<'a>(records: impl IntoIterator<Item = &'a CleanedRecord>) -> Self {
        let records: Vec<&CleanedRecord> = records.into_iter().collect();
        if records.is_empty() {
            return Self::default();
        }

        let years = records.iter().map(|r| r.year);
        let year_range = years.clone().min().zip(years.max());

        let unique_journals = records
            .iter()
            .map(|r| r.journal.as_str())
            .collect::<HashSet<_>>()
            .len();

        let lengths: Vec<usize> = records.iter().map(|r| r.abstract_word_count).collect();

        Self {
            total_papers: records.len(),
            year_range,
            unique_journals,
            papers_with_abstracts: records.iter().filter(|r| r.has_abstract()).count(),
            most_common_journal: most_common(records.iter().map(|r| r.journal.as_str())),
            mean_abstract_words: mean(&lengths),
            min_abstract_words: lengths.iter().copied().min().unwrap_or(0),
            p95_abstract_words: quantile(&lengths, 0.95),
        }
    }
}

/// The most frequent value; ties go to the value seen first.
fn most_common<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (order, value) in values.enumerate() {
        counts.entry(value).or_insert((0, order)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
        .map(|(value, _)| value.to_string())
}

pub fn mean(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<usize>() as f64 / values.len() as f64
}

/// Quantile with linear interpolation between the closest ranks.
pub fn quantile(values: &[usize], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] as f64 + (sorted[hi] as f64 - sorted[lo] as f64) * frac
}
