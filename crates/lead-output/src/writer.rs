//! Single-sheet xlsx encoding.

use std::path::Path;

use chrono::NaiveTime;
use lead_model::{Cell, Table, format_number};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use tracing::debug;

use crate::error::{OutputError, Result};

/// Name of the only worksheet in a processed workbook.
pub const SHEET_NAME: &str = "Processed Data";

/// Worksheet grid limits of the xlsx format.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// Encode `table` as an xlsx workbook.
///
/// One sheet named [`SHEET_NAME`], a bold header row of column names, then
/// one row per record. There is no index column. Null cells are left blank;
/// booleans and dates are written as native xlsx booleans and dates.
pub fn write_workbook_bytes(table: &Table) -> Result<Vec<u8>> {
    // One extra row for the header.
    if table.height() + 1 > MAX_ROWS || table.width() > MAX_COLUMNS {
        return Err(OutputError::TooLarge {
            rows: table.height(),
            columns: table.width(),
        });
    }
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let date_formats = DateFormats::new();

    for (col_index, column) in table.columns().iter().enumerate() {
        // Bounds checked above.
        let col = col_index as u16;
        worksheet.write_string_with_format(0, col, column.name.as_str(), &header_format)?;
        for (row_index, cell) in column.cells.iter().enumerate() {
            write_cell(worksheet, row_index as u32 + 1, col, cell, &date_formats)?;
        }
    }
    let bytes = workbook.save_to_buffer()?;
    debug!(
        rows = table.height(),
        columns = table.width(),
        bytes = bytes.len(),
        "workbook encoded"
    );
    Ok(bytes)
}

/// Encode `table` and write it to `path`.
pub fn write_workbook(table: &Table, path: &Path) -> Result<()> {
    let bytes = write_workbook_bytes(table)?;
    std::fs::write(path, bytes).map_err(|source| OutputError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Number formats for date cells. Midnight values are shown as plain dates.
const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    formats: &DateFormats,
) -> Result<()> {
    match cell {
        Cell::Null => {}
        Cell::Text(value) => {
            worksheet.write_string(row, col, value.as_str())?;
        }
        Cell::Number(value) if value.is_finite() => {
            worksheet.write_number(row, col, *value)?;
        }
        Cell::Number(value) => {
            worksheet.write_string(row, col, format_number(*value))?;
        }
        Cell::Bool(value) => {
            worksheet.write_boolean(row, col, *value)?;
        }
        Cell::DateTime(value) => {
            let format = if value.time() == NaiveTime::MIN {
                &formats.date
            } else {
                &formats.datetime
            };
            worksheet.write_datetime_with_format(row, col, value, format)?;
        }
    }
    Ok(())
}

struct DateFormats {
    date: Format,
    datetime: Format,
}

impl DateFormats {
    fn new() -> Self {
        Self {
            date: Format::new().set_num_format(DATE_FORMAT),
            datetime: Format::new().set_num_format(DATETIME_FORMAT),
        }
    }
}
