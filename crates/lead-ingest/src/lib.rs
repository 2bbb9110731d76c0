//! Lead workbook ingestion.
//!
//! Decodes the first worksheet of an uploaded spreadsheet into a
//! [`Table`](lead_model::Table). The first row supplies the column names
//! and every following row becomes one lead record.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use lead_ingest::read_workbook;
//!
//! let table = read_workbook(Path::new("leads.xlsx"))?;
//! println!("{} leads", table.height());
//! ```

mod error;
mod header;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Workbook Reading ===
pub use header::{header_names, unnamed_header};
pub use reader::{
    MAX_WORKBOOK_FILE_SIZE, MISSING_VALUE_MARKERS, cell_from_data, check_file_size_with_limit,
    is_missing_marker, read_workbook, read_workbook_bytes,
};
