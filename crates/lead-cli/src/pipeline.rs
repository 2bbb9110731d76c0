//! Decode, normalize, encode.
//!
//! Shared by the `process` command and the upload handler. Everything here
//! is synchronous and CPU-bound; async callers run it on a blocking thread.

use std::path::Path;
use std::time::Instant;

use lead_ingest::{IngestError, read_workbook, read_workbook_bytes};
use lead_model::Table;
use lead_normalize::{NormalizeReport, normalize_with_report};
use lead_output::{OutputError, write_workbook_bytes};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::logging::log_data_enabled;

/// Failure of one pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] IngestError),
    #[error(transparent)]
    Encode(#[from] OutputError),
}

/// A normalized table with its encoded workbook.
#[derive(Debug)]
pub struct ProcessedWorkbook {
    pub table: Table,
    pub bytes: Vec<u8>,
    pub report: NormalizeReport,
}

/// Run the pipeline over an in-memory upload.
pub fn process_workbook_bytes(input: &[u8]) -> Result<ProcessedWorkbook, PipelineError> {
    let start = Instant::now();
    let table = read_workbook_bytes(input)?;
    log_decoded(&table, start);
    finish(table)
}

/// Run the pipeline over a workbook on disk.
pub fn process_workbook_file(path: &Path) -> Result<ProcessedWorkbook, PipelineError> {
    let start = Instant::now();
    let table = read_workbook(path)?;
    log_decoded(&table, start);
    finish(table)
}

/// Normalize an already-decoded table and encode it.
pub fn finish(table: Table) -> Result<ProcessedWorkbook, PipelineError> {
    let start = Instant::now();
    let (table, report) = normalize_with_report(table);
    for step in &report.steps {
        debug!(
            rule = step.rule.display_name(),
            applied = step.outcome.is_applied(),
            changed = step.outcome.changed(),
            "rule outcome"
        );
    }
    info!(
        rows = report.rows,
        columns_in = report.columns_in,
        columns_out = report.columns_out,
        changed = report.total_changed(),
        duration_ms = start.elapsed().as_millis(),
        "normalize complete"
    );

    let start = Instant::now();
    let bytes = write_workbook_bytes(&table)?;
    info!(
        bytes = bytes.len(),
        duration_ms = start.elapsed().as_millis(),
        "encode complete"
    );
    Ok(ProcessedWorkbook {
        table,
        bytes,
        report,
    })
}

fn log_decoded(table: &Table, start: Instant) {
    info!(
        rows = table.height(),
        columns = table.width(),
        duration_ms = start.elapsed().as_millis(),
        "decode complete"
    );
    debug!(columns = ?table.column_names(), "decoded headers");
    if log_data_enabled()
        && let Some(row) = table.row(0)
    {
        let rendered: Vec<String> = row.iter().map(ToString::to_string).collect();
        trace!(row = %rendered.join(" | "), "first row");
    }
}
