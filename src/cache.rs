use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use paper_explorer::{analyze_file, Analysis, Error, Result};

// ---------------------------------------------------------------------------
// Memoized analysis, keyed by input path and modification time
// ---------------------------------------------------------------------------

struct CacheEntry {
    path: PathBuf,
    modified: SystemTime,
    analysis: Arc<Analysis>,
}

/// Holds the most recent pipeline result so filter changes never reprocess
/// the input file. A different path or a newer modification time triggers a
/// reload.
#[derive(Default)]
pub struct AnalysisCache {
    entry: Option<CacheEntry>,
    loads: usize,
}

impl AnalysisCache {
    /// Return the cached analysis for `path`, running the pipeline if the
    /// file changed since it was cached.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Analysis>> {
        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| Error::from_open(e, path))?;

        if let Some(entry) = &self.entry {
            if entry.path == path && entry.modified == modified {
                log::debug!("Using cached analysis for {}", path.display());
                return Ok(Arc::clone(&entry.analysis));
            }
        }

        let analysis = Arc::new(analyze_file(path)?);
        self.loads += 1;
        log::debug!("Pipeline run {} for {}", self.loads, path.display());
        self.entry = Some(CacheEntry {
            path: path.to_path_buf(),
            modified,
            analysis: Arc::clone(&analysis),
        });
        Ok(analysis)
    }

    /// Number of times the pipeline actually ran.
    #[cfg(test)]
    pub fn loads(&self) -> usize {
        self.loads
    }
}
