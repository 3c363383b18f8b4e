//! Data layer: record types, loading, cleaning, aggregation and filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .tsv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → RawTable (every field optional text)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  cleaner  │  year, abstract_word_count, journal sentinel → CleanedTable
//!   └──────────┘
//!        │
//!        ├──────────────┬──────────────┐
//!        ▼              ▼              ▼
//!   ┌───────────┐  ┌─────────┐   ┌──────────┐
//!   │ aggregate │  │  stats  │   │  filter   │  dashboard predicate
//!   └───────────┘  └─────────┘   └──────────┘
//! ```

pub mod aggregate;
pub mod cleaner;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;

use std::path::{Path, PathBuf};

use crate::error::Result;

use aggregate::Aggregates;
use model::CleanedTable;
use stats::DatasetSummary;

/// Everything one run of the pipeline produces for a single input file.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub source: PathBuf,
    pub table: CleanedTable,
    pub aggregates: Aggregates,
    pub summary: DatasetSummary,
}

/// Load, clean and aggregate the file at `path`.
pub fn analyze_file(path: &Path) -> Result<Analysis> {
    let raw = loader::load_file(path)?;
    log::info!(
        "Loaded {} raw records with columns {:?}",
        raw.len(),
        raw.columns
    );

    let table = cleaner::clean(&raw)?;
    log::info!(
        "Cleaned table has {} records (dropped {} without title, {} without year, {} before 2001)",
        table.len(),
        table.dropped_missing_title,
        table.dropped_missing_year,
        table.dropped_out_of_range
    );

    let aggregates = Aggregates::compute(&table.records);
    let summary = DatasetSummary::compute(&table.records);

    Ok(Analysis {
        source: path.to_path_buf(),
        table,
        aggregates,
        summary,
    })
}
