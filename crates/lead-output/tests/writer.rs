//! Tests for workbook encoding, read back with calamine.

use std::io::Cursor;

use calamine::{Data, DataType, Reader, Xlsx};
use chrono::NaiveDate;
use lead_model::{Cell, Column, Table};
use lead_output::{SHEET_NAME, write_workbook, write_workbook_bytes};

fn sample_table() -> Table {
    Table::from_columns(vec![
        Column::new(
            "Country",
            vec![Cell::text("Canada"), Cell::text("USA"), Cell::Null],
        ),
        Column::new(
            "Score",
            vec![Cell::Number(3.0), Cell::Null, Cell::Number(2.5)],
        ),
        Column::new("Lead Source", vec![Cell::text("Lead - Solidworks"); 3]),
    ])
    .unwrap()
}

fn open(bytes: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
    Xlsx::new(Cursor::new(bytes)).expect("open written workbook")
}

#[test]
fn writes_single_named_sheet() {
    let bytes = write_workbook_bytes(&sample_table()).expect("write workbook");
    let workbook = open(bytes);
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
}

#[test]
fn writes_header_row_and_cells_without_index() {
    let bytes = write_workbook_bytes(&sample_table()).expect("write workbook");
    let mut workbook = open(bytes);
    let range = workbook.worksheet_range(SHEET_NAME).expect("read sheet");
    assert_eq!(range.get_size(), (4, 3));
    assert_eq!(range.get((0, 0)), Some(&Data::String("Country".into())));
    assert_eq!(range.get((0, 2)), Some(&Data::String("Lead Source".into())));
    assert_eq!(range.get((1, 0)), Some(&Data::String("Canada".into())));
    assert_eq!(range.get((1, 1)), Some(&Data::Float(3.0)));
    assert_eq!(range.get((2, 1)), Some(&Data::Empty));
    assert_eq!(range.get((3, 0)), Some(&Data::Empty));
    assert_eq!(range.get((3, 1)), Some(&Data::Float(2.5)));
}

#[test]
fn header_only_for_empty_table() {
    let table = Table::from_columns(vec![Column::new("Notes", vec![])]).unwrap();
    let bytes = write_workbook_bytes(&table).expect("write workbook");
    let mut workbook = open(bytes);
    let range = workbook.worksheet_range(SHEET_NAME).expect("read sheet");
    assert_eq!(range.get_size(), (1, 1));
}

#[test]
fn writes_to_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("lead SW 2024-03-05.xlsx");
    write_workbook(&sample_table(), &path).expect("write workbook");
    let bytes = std::fs::read(&path).expect("read back");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn missing_directory_is_a_write_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing").join("out.xlsx");
    let err = write_workbook(&sample_table(), &path).unwrap_err();
    assert!(err.to_string().starts_with("failed to write"));
}

#[test]
fn booleans_and_dates_keep_their_type() {
    let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let midnight = day.and_hms_opt(0, 0, 0).unwrap();
    let afternoon = day.and_hms_opt(13, 5, 9).unwrap();
    let table = Table::from_columns(vec![
        Column::new("Opted In", vec![Cell::Bool(true), Cell::Bool(false)]),
        Column::new(
            "Created",
            vec![Cell::DateTime(midnight), Cell::DateTime(afternoon)],
        ),
    ])
    .unwrap();

    let bytes = write_workbook_bytes(&table).expect("write workbook");
    let mut workbook = open(bytes);
    let range = workbook.worksheet_range(SHEET_NAME).expect("read sheet");
    assert_eq!(range.get((1, 0)), Some(&Data::Bool(true)));
    assert_eq!(range.get((2, 0)), Some(&Data::Bool(false)));

    let created = range.get((1, 1)).expect("date cell");
    assert!(matches!(created, Data::DateTime(_)));
    assert_eq!(created.as_datetime(), Some(midnight));
    let updated = range
        .get((2, 1))
        .and_then(DataType::as_datetime)
        .expect("datetime cell");
    // Excel stores times as fractions of a day.
    assert!((updated - afternoon).num_milliseconds().abs() < 1000);
}
