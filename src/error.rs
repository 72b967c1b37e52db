//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Source and sink failures carry the offending path; alignment failures carry
//! enough context to find the diverging row.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot read source {path:?}: {reason}")]
    SourceRead { path: PathBuf, reason: String },

    #[error("Shape mismatch: expected {expected}, found {found}")]
    Shape { expected: String, found: String },

    #[error("Cannot write {path:?}: {reason}")]
    SinkWrite { path: PathBuf, reason: String },

    #[error(
        "Image and mask records are misaligned ({image_rows} image rows, {mask_rows} mask rows): {detail}"
    )]
    Alignment {
        image_rows: usize,
        mask_rows: usize,
        detail: String,
    },

    #[error("No cloud coverage value for subscene {source_id}")]
    MissingCloudValue { source_id: String },

    #[error("Handoff metadata not found at {path:?}; run the image stage first")]
    MissingHandoff { path: PathBuf },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn source_read<E: std::fmt::Display>(path: impl Into<PathBuf>, e: E) -> Self {
        Error::SourceRead {
            path: path.into(),
            reason: e.to_string(),
        }
    }

    pub fn sink_write<E: std::fmt::Display>(path: impl Into<PathBuf>, e: E) -> Self {
        Error::SinkWrite {
            path: path.into(),
            reason: e.to_string(),
        }
    }
}
