//! Error types for the metadata pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Pipeline errors.
///
/// Only whole-run failures live here. Malformed individual fields never
/// surface as errors; the cleaner resolves them with fallbacks.
#[derive(Error, Debug)]
pub enum Error {
    #[error("input file not found or not a regular file: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("required column '{column}' is missing from the input")]
    MissingColumn { column: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("invalid file: {0}")]
    InvalidFile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// Map an I/O error from opening `path` to [`Error::MissingInput`] when
    /// the file does not exist.
    pub fn from_open(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::MissingInput {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(err)
        }
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
