//! Header row handling.

use std::borrow::Cow;
use std::collections::HashSet;

use lead_model::Cell;

/// Name given to a column whose header cell is blank.
pub fn unnamed_header(index: usize) -> String {
    format!("Unnamed: {index}")
}

/// Turn header cells into column names.
///
/// Blank headers become `Unnamed: <index>`. Repeated names get a `.1`,
/// `.2`, ... suffix so every column stays addressable. Names are otherwise
/// kept verbatim, surrounding whitespace included.
pub fn header_names(cells: &[Cell]) -> Vec<String> {
    let raw = cells.iter().enumerate().map(|(index, cell)| {
        cell.to_text()
            .filter(|text| !text.is_empty())
            .map_or_else(|| unnamed_header(index), Cow::into_owned)
    });
    dedupe_headers(raw)
}

fn dedupe_headers(names: impl Iterator<Item = String>) -> Vec<String> {
    let names: Vec<String> = names.collect();
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let mut candidate = name.clone();
        let mut suffix = 0;
        while seen.contains(&candidate) {
            suffix += 1;
            candidate = format!("{name}.{suffix}");
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_headers_are_named_by_position() {
        let names = header_names(&[Cell::text("A"), Cell::Null, Cell::text("")]);
        assert_eq!(names, vec!["A", "Unnamed: 1", "Unnamed: 2"]);
    }

    #[test]
    fn numeric_headers_render_as_text() {
        let names = header_names(&[Cell::Number(2024.0)]);
        assert_eq!(names, vec!["2024"]);
    }

    #[test]
    fn duplicate_headers_get_suffixes() {
        let names = header_names(&[
            Cell::text("Notes"),
            Cell::text("Notes"),
            Cell::text("Notes.1"),
            Cell::text("Notes"),
        ]);
        assert_eq!(names, vec!["Notes", "Notes.1", "Notes.1.1", "Notes.2"]);
    }

    #[test]
    fn whitespace_is_preserved() {
        let names = header_names(&[Cell::text(" Country/Region ")]);
        assert_eq!(names, vec![" Country/Region "]);
    }
}
