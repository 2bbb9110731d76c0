//! Lead workbook output.
//!
//! This crate provides the download side of the pipeline:
//!
//! - **writer**: encode a [`Table`](lead_model::Table) as a single-sheet xlsx
//! - **naming**: the `lead SW <date>.xlsx` download name and MIME type

mod error;
mod naming;
mod writer;

pub use error::{OutputError, Result};
pub use naming::{OUTPUT_FILENAME_PREFIX, XLSX_CONTENT_TYPE, output_filename, output_filename_today};
pub use writer::{SHEET_NAME, write_workbook, write_workbook_bytes};
