use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("column '{column}' has {found} cells, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("row {row} has {found} cells but the header has {width} columns")]
    RowTooWide {
        row: usize,
        width: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
