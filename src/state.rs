use std::path::{Path, PathBuf};
use std::sync::Arc;

use paper_explorer::data::aggregate::Aggregates;
use paper_explorer::data::export::write_records_csv;
use paper_explorer::data::filter::{filtered_indices, RecordFilter};
use paper_explorer::data::model::CleanedRecord;
use paper_explorer::data::stats::DatasetSummary;
use paper_explorer::Analysis;

use crate::cache::AnalysisCache;

/// Tabs of the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    PublicationsOverTime,
    JournalAnalysis,
    ContentAnalysis,
    SampleData,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::PublicationsOverTime,
        Tab::JournalAnalysis,
        Tab::ContentAnalysis,
        Tab::SampleData,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::PublicationsOverTime => "Publications Over Time",
            Tab::JournalAnalysis => "Journal Analysis",
            Tab::ContentAnalysis => "Content Analysis",
            Tab::SampleData => "Sample Data",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Memoized pipeline output.
    pub cache: AnalysisCache,

    /// Input file currently shown.
    pub input_path: Option<PathBuf>,

    /// Loaded analysis (None until a file loads successfully).
    pub analysis: Option<Arc<Analysis>>,

    /// Current sidebar selection.
    pub filter: Option<RecordFilter>,

    /// Indices of records passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates and summary over the visible records.
    pub filtered_aggregates: Aggregates,
    pub filtered_summary: DatasetSummary,

    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load (or reuse) the analysis for `path` and reset the filters.
    pub fn load(&mut self, path: &Path) {
        match self.cache.get_or_load(path) {
            Ok(analysis) => {
                log::info!(
                    "Loaded {} cleaned records from {}",
                    analysis.table.len(),
                    path.display()
                );
                self.filter = Some(RecordFilter::initial(&analysis));
                self.analysis = Some(analysis);
                self.status_message = None;
                self.refilter();
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.analysis = None;
                self.filter = None;
                self.visible_indices.clear();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
        self.input_path = Some(path.to_path_buf());
    }

    /// Recompute `visible_indices` and the filtered views after a filter change.
    pub fn refilter(&mut self) {
        let (Some(analysis), Some(filter)) = (&self.analysis, &self.filter) else {
            return;
        };
        self.visible_indices = filtered_indices(&analysis.table, filter);
        let visible = self
            .visible_indices
            .iter()
            .map(|&i| &analysis.table.records[i]);
        self.filtered_aggregates = Aggregates::compute(visible.clone());
        self.filtered_summary = DatasetSummary::compute(visible);
    }

    /// Records passing the current filter, in table order.
    pub fn visible_records(&self) -> impl Iterator<Item = &CleanedRecord> {
        let records = self.analysis.as_deref().map(|a| &a.table.records);
        self.visible_indices
            .iter()
            .filter_map(move |&i| records.and_then(|r| r.get(i)))
    }

    /// Toggle a journal in the journal selection.
    pub fn toggle_journal(&mut self, journal: &str) {
        if let Some(filter) = &mut self.filter {
            if !filter.journals.remove(journal) {
                filter.journals.insert(journal.to_string());
            }
        }
        self.refilter();
    }

    /// Select every top journal.
    pub fn select_all_journals(&mut self) {
        if let (Some(analysis), Some(filter)) = (&self.analysis, &mut self.filter) {
            filter.journals = analysis
                .aggregates
                .top_journals
                .iter()
                .map(|(j, _)| j.clone())
                .collect();
        }
        self.refilter();
    }

    /// Clear the journal selection, which removes the journal constraint.
    pub fn select_no_journals(&mut self) {
        if let Some(filter) = &mut self.filter {
            filter.journals.clear();
        }
        self.refilter();
    }

    /// Write the visible records to `path` as CSV.
    pub fn export_filtered(&mut self, path: &Path) {
        let result = std::fs::File::create(path)
            .map_err(paper_explorer::Error::from)
            .and_then(|file| {
                write_records_csv(std::io::BufWriter::new(file), self.visible_records())
            });
        match result {
            Ok(rows) => {
                log::info!("Exported {rows} records to {}", path.display());
                self.status_message = Some(format!("Saved {rows} records to {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
