//! Download naming for processed workbooks.

use chrono::{Local, NaiveDate};

/// Prefix of every processed workbook name.
pub const OUTPUT_FILENAME_PREFIX: &str = "lead SW ";

/// MIME type of the produced workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Suggested filename for a workbook processed on `date`.
///
/// ```
/// use chrono::NaiveDate;
/// use lead_output::output_filename;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(output_filename(date), "lead SW 2024-03-05.xlsx");
/// ```
pub fn output_filename(date: NaiveDate) -> String {
    format!("{OUTPUT_FILENAME_PREFIX}{}.xlsx", date.format("%Y-%m-%d"))
}

/// Suggested filename for a workbook processed today (local time).
pub fn output_filename_today() -> String {
    output_filename(Local::now().date_naive())
}
