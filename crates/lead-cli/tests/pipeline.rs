//! Decode, normalize and encode a workbook end to end.

use lead_cli::pipeline::process_workbook_bytes;
use lead_model::Cell;
use rust_xlsxwriter::Workbook;

fn workbook(headers: &[&str], row: &[&str]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (col, value) in row.iter().enumerate() {
        sheet.write_string(1, col as u16, *value).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

#[test]
fn placeholder_values_are_filled_like_blanks() {
    let bytes = workbook(
        &[
            "EmailAddress",
            "Lead Rating",
            "Prospect Lead Reassignment",
            "Notes",
            "CompanyName",
        ],
        &["N/A", "NULL", "Y", "N/A", "n/a"],
    );
    let processed = process_workbook_bytes(&bytes).expect("pipeline");
    let table = &processed.table;
    let cells = |name: &str| table.column(name).unwrap().cells.clone();
    assert_eq!(cells("EmailAddress"), vec![Cell::text("noemail@gmail.com")]);
    assert_eq!(cells("Lead Rating"), vec![Cell::text("Warm")]);
    assert_eq!(cells("Notes"), vec![Cell::text("Reassigned Lead")]);
    assert_eq!(cells("CompanyName"), vec![Cell::text("NA")]);

    // The encoded workbook carries the same values.
    let reread = lead_ingest::read_workbook_bytes(&processed.bytes).expect("read output");
    assert_eq!(
        reread.column("EmailAddress").unwrap().cells,
        vec![Cell::text("noemail@gmail.com")]
    );
}
