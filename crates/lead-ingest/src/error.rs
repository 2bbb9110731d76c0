//! Error types for workbook ingestion.

use std::path::PathBuf;

use lead_model::ModelError;
use thiserror::Error;

/// Errors that can occur while decoding an uploaded workbook.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Workbook file not found.
    #[error("workbook not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("workbook {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Workbook Errors ===
    /// Bytes are not a readable spreadsheet.
    #[error("not a readable workbook: {message}")]
    Workbook { message: String },

    /// The workbook contains no worksheet.
    #[error("workbook has no worksheet")]
    NoWorksheet,

    /// Decoded cells could not form a table.
    #[error("invalid sheet layout: {0}")]
    Layout(#[from] ModelError),
}

impl From<calamine::Error> for IngestError {
    fn from(err: calamine::Error) -> Self {
        Self::Workbook {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
