//! Decoding real xlsx workbooks.

use std::fs;

use lead_ingest::{IngestError, read_workbook, read_workbook_bytes};
use chrono::NaiveDate;
use lead_model::Cell;
use rust_xlsxwriter::Workbook;

fn leads_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Country/Region").unwrap();
    sheet.write_string(0, 1, "ContactPhone").unwrap();
    sheet.write_string(0, 3, "Notes").unwrap();
    sheet.write_string(0, 4, "Notes").unwrap();

    sheet.write_string(1, 0, "Mexico").unwrap();
    sheet.write_number(1, 1, 5145551234.0).unwrap();
    sheet.write_string(1, 3, "Called").unwrap();

    sheet.write_string(2, 1, "(514) 555-1234").unwrap();
    sheet.write_boolean(2, 4, false).unwrap();

    let second = workbook.add_worksheet();
    second.write_string(0, 0, "Ignored").unwrap();
    workbook.save_to_buffer().unwrap()
}

#[test]
fn reads_first_sheet_with_header_row() {
    let table = read_workbook_bytes(&leads_workbook()).expect("read workbook");
    assert_eq!(
        table.column_names(),
        vec!["Country/Region", "ContactPhone", "Unnamed: 2", "Notes", "Notes.1"]
    );
    assert_eq!(table.height(), 2);
    assert_eq!(
        table.column("Country/Region").unwrap().cells,
        vec![Cell::text("Mexico"), Cell::Null]
    );
    assert_eq!(
        table.column("ContactPhone").unwrap().cells,
        vec![Cell::Number(5145551234.0), Cell::text("(514) 555-1234")]
    );
    assert_eq!(
        table.column("Unnamed: 2").unwrap().cells,
        vec![Cell::Null, Cell::Null]
    );
    assert_eq!(
        table.column("Notes.1").unwrap().cells,
        vec![Cell::Null, Cell::Bool(false)]
    );
}

#[test]
fn missing_value_markers_read_as_null() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "EmailAddress").unwrap();
    sheet.write_string(0, 1, "NA").unwrap();
    sheet.write_string(1, 0, "N/A").unwrap();
    sheet.write_string(1, 1, "NULL").unwrap();
    sheet.write_string(2, 0, "n/a").unwrap();
    sheet.write_string(2, 1, "North America").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let table = read_workbook_bytes(&bytes).expect("read workbook");
    assert_eq!(table.column_names(), vec!["EmailAddress", "NA"]);
    assert_eq!(
        table.column("EmailAddress").unwrap().cells,
        vec![Cell::Null, Cell::Null]
    );
    assert_eq!(
        table.column("NA").unwrap().cells,
        vec![Cell::Null, Cell::text("North America")]
    );
}

#[test]
fn dates_and_booleans_keep_their_type() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Created").unwrap();
    sheet.write_string(0, 1, "Opted In").unwrap();
    let format = rust_xlsxwriter::Format::new().set_num_format("yyyy-mm-dd");
    // 45413 is 2024-05-01 as an Excel serial date.
    sheet.write_number_with_format(1, 0, 45413.0, &format).unwrap();
    sheet.write_boolean(1, 1, true).unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let table = read_workbook_bytes(&bytes).expect("read workbook");
    let expected = NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(
        table.column("Created").unwrap().cells,
        vec![Cell::DateTime(expected)]
    );
    assert_eq!(table.column("Opted In").unwrap().cells, vec![Cell::Bool(true)]);
}

#[test]
fn empty_sheet_gives_empty_table() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    let bytes = workbook.save_to_buffer().unwrap();
    let table = read_workbook_bytes(&bytes).expect("read workbook");
    assert_eq!(table.height(), 0);
    assert_eq!(table.width(), 0);
}

#[test]
fn header_only_sheet_has_columns_but_no_rows() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "EmailAddress").unwrap();
    sheet.write_string(0, 1, "State").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();
    let table = read_workbook_bytes(&bytes).expect("read workbook");
    assert_eq!(table.column_names(), vec!["EmailAddress", "State"]);
    assert_eq!(table.height(), 0);
}

#[test]
fn reads_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("leads.xlsx");
    fs::write(&path, leads_workbook()).expect("write workbook");
    let table = read_workbook(&path).expect("read workbook");
    assert_eq!(table.height(), 2);
}

#[test]
fn truncated_workbook_is_rejected() {
    let bytes = leads_workbook();
    let err = read_workbook_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
    assert!(matches!(err, IngestError::Workbook { .. }));
}
