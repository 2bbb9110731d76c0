//! Property tests: row preservation and idempotence over generated tables.

use lead_model::{Cell, Column, Table};
use lead_normalize::{normalize, normalize_with_report};
use proptest::prelude::*;

/// Header pool in a fixed order; generated tables use a subsequence of it.
const HEADERS: &[&str] = &[
    "Country/Region",
    "Country",
    "State",
    "ContactPhone",
    "EmailAddress",
    "CompanyName",
    "Source",
    "Lead Rating",
    "Prospect Lead Reassignment",
    "Notes",
    "Lead Source",
    "FirstName",
];

const INTERESTING: &[&str] = &[
    "",
    "  ",
    "PQ",
    "QC",
    "ON",
    "Canada",
    "USA",
    "Mexico",
    "(514) 555-1234",
    "RAQ-2024",
    "web rad",
    "eDrawings Activation",
    "5 - very cold",
    "very cold",
    "5 - Very Cold",
    "cold",
    "Hot",
    "y ",
    "Y",
    "N",
    "Reassigned Lead",
    "Called twice",
];

fn cell_strategy() -> impl Strategy<Value = Cell> {
    prop_oneof![
        Just(Cell::Null),
        prop::sample::select(INTERESTING).prop_map(Cell::text),
        (-10_000i64..10_000).prop_map(|n| Cell::Number(n as f64)),
        "[a-zA-Z0-9 ()/-]{0,12}".prop_map(Cell::Text),
    ]
}

fn table_strategy() -> impl Strategy<Value = Table> {
    (
        prop::sample::subsequence(HEADERS.to_vec(), 0..=HEADERS.len()),
        0usize..8,
    )
        .prop_flat_map(|(names, height)| {
            names
                .into_iter()
                .map(|name| {
                    prop::collection::vec(cell_strategy(), height)
                        .prop_map(move |cells| Column::new(name, cells))
                })
                .collect::<Vec<_>>()
        })
        .prop_map(|columns| Table::from_columns(columns).expect("equal-height columns"))
}

proptest! {
    #[test]
    fn row_count_is_preserved(table in table_strategy()) {
        let height = table.height();
        let out = normalize(table);
        prop_assert_eq!(out.height(), height);
    }

    #[test]
    fn untouched_columns_keep_row_order(table in table_strategy()) {
        let before = table.column("FirstName").cloned();
        let out = normalize(table);
        prop_assert_eq!(out.column("FirstName").cloned(), before);
    }

    #[test]
    fn normalize_is_idempotent(table in table_strategy()) {
        let once = normalize(table);
        let (twice, report) = normalize_with_report(once.clone());
        prop_assert_eq!(report.total_changed(), 0);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn rating_is_never_blank_after_normalize(table in table_strategy()) {
        let out = normalize(table);
        if let Some(rating) = out.column("Lead Rating") {
            prop_assert!(rating.cells.iter().all(|cell| !cell.is_null()));
        }
    }
}
