//! Workbook reading: first worksheet, first row as header.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto_from_rs};
use lead_model::{Cell, Table};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::header::header_names;

/// Maximum file size for workbook loading (100 MB default).
pub const MAX_WORKBOOK_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Text values read as missing, matched exactly (no trimming, case
/// sensitive). The usual spreadsheet-export spellings of "no value".
pub const MISSING_VALUE_MARKERS: [&str; 19] = [
    "",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "None",
    "n/a",
    "nan",
    "null",
];

/// Column count above which a warning is logged.
const WIDE_SHEET_COLUMNS: usize = 500;

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| file_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Read the first worksheet of the workbook at `path`.
pub fn read_workbook(path: &Path) -> Result<Table> {
    check_file_size_with_limit(path, MAX_WORKBOOK_FILE_SIZE)?;
    let bytes = std::fs::read(path).map_err(|e| file_error(path, e))?;
    let table = read_workbook_bytes(&bytes)?;
    debug!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "workbook loaded"
    );
    Ok(table)
}

/// Decode workbook bytes (xlsx, xlsm, xlsb, xls or ods) into a table.
///
/// The first row of the first worksheet supplies column names; each later
/// row becomes one table row. An empty sheet gives an empty table.
pub fn read_workbook_bytes(bytes: &[u8]) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)??;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Table::default());
    };
    // Missing-value markers only apply to data rows; a header named "NA" keeps its name.
    let headers = header_names(&header_row.iter().map(typed_cell).collect::<Vec<_>>());
    if headers.len() > WIDE_SHEET_COLUMNS {
        warn!(
            columns = headers.len(),
            "Sheet has more than {WIDE_SHEET_COLUMNS} columns - may impact performance"
        );
    }
    let records: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    Ok(Table::from_rows(headers, records)?)
}

/// Returns true if `value` is one of the [`MISSING_VALUE_MARKERS`].
pub fn is_missing_marker(value: &str) -> bool {
    MISSING_VALUE_MARKERS.contains(&value)
}

/// Convert a decoded spreadsheet cell into a table cell.
///
/// Blank strings, [`MISSING_VALUE_MARKERS`] and error cells (`#N/A`,
/// `#DIV/0!`, ...) count as missing. Booleans and dates keep their type so
/// they are written back as booleans and dates.
pub fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::String(value) if is_missing_marker(value) => Cell::Null,
        _ => typed_cell(data),
    }
}

fn typed_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Null,
        Data::String(value) if value.is_empty() => Cell::Null,
        Data::String(value) => Cell::text(value.as_str()),
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Bool(*value),
        Data::DateTime(_) => data.as_datetime().map_or(Cell::Null, Cell::DateTime),
        Data::DateTimeIso(value) => data
            .as_datetime()
            .map_or_else(|| Cell::text(value.as_str()), Cell::DateTime),
        Data::DurationIso(value) => Cell::text(value.as_str()),
    }
}

fn file_error(path: &Path, source: std::io::Error) -> IngestError {
    if source.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        }
    }
}
