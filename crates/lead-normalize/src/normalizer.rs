//! Entry points that run every rule in order.

use lead_model::Table;

use crate::report::{NormalizeReport, StepReport};
use crate::rules::Rule;

/// Normalize a lead table.
///
/// Applies every [`Rule`] in [`Rule::ALL`] order. Missing columns are not an
/// error; the rules that need them are skipped. Row count and row order are
/// preserved, and normalizing an already-normalized table changes nothing.
///
/// # Examples
///
/// ```
/// use lead_model::{Cell, Column, Table};
/// use lead_normalize::normalize;
///
/// let table = Table::from_columns(vec![
///     Column::new("State", vec![Cell::text("PQ"), Cell::Null]),
/// ])
/// .unwrap();
/// let table = normalize(table);
///
/// assert_eq!(
///     table.column("State").unwrap().cells,
///     vec![Cell::text("QC"), Cell::text("QC")]
/// );
/// assert!(table.has_column("Lead Source"));
/// ```
pub fn normalize(table: Table) -> Table {
    normalize_with_report(table).0
}

/// Normalize a lead table and report what each rule did.
pub fn normalize_with_report(mut table: Table) -> (Table, NormalizeReport) {
    let report = normalize_in_place(&mut table);
    (table, report)
}

/// Normalize `table` in place.
pub fn normalize_in_place(table: &mut Table) -> NormalizeReport {
    let columns_in = table.width();
    let steps = Rule::ALL
        .iter()
        .map(|rule| StepReport {
            rule: *rule,
            outcome: rule.apply(table),
        })
        .collect();
    NormalizeReport {
        rows: table.height(),
        columns_in,
        columns_out: table.width(),
        steps,
    }
}
