//! Column-oriented in-memory table.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{ModelError, Result};

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// A column with the same value in every row.
    pub fn constant(name: impl Into<String>, value: &Cell, height: usize) -> Self {
        Self::new(name, vec![value.clone(); height])
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Ordered columns over ordered rows.
///
/// Every column holds exactly `height` cells. Column names are not required
/// to be unique; lookups by name resolve to the first match. Deserializing
/// rejects columns whose length differs from `height`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "TableParts")]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

/// Serialized form of [`Table`], checked before it becomes one.
#[derive(Deserialize)]
struct TableParts {
    columns: Vec<Column>,
    height: usize,
}

impl TryFrom<TableParts> for Table {
    type Error = ModelError;

    fn try_from(parts: TableParts) -> Result<Self> {
        if let Some(column) = parts.columns.iter().find(|c| c.len() != parts.height) {
            return Err(ModelError::RaggedColumn {
                column: column.name.clone(),
                expected: parts.height,
                found: column.len(),
            });
        }
        Ok(Self {
            columns: parts.columns,
            height: parts.height,
        })
    }
}

impl Table {
    /// An empty table with the given number of rows and no columns.
    pub fn with_height(height: usize) -> Self {
        Self {
            columns: Vec::new(),
            height,
        }
    }

    /// Build a table from columns, rejecting columns of differing length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let height = columns.first().map_or(0, Column::len);
        for column in &columns {
            if column.len() != height {
                return Err(ModelError::RaggedColumn {
                    column: column.name.clone(),
                    expected: height,
                    found: column.len(),
                });
            }
        }
        Ok(Self { columns, height })
    }

    /// Build a table from a header and row-major records.
    ///
    /// Rows shorter than the header are padded with `Null`; rows longer than
    /// the header are rejected.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let width = headers.len();
        let height = rows.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(height)))
            .collect();
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(ModelError::RowTooWide {
                    row: row_index,
                    width,
                    found: row.len(),
                });
            }
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.cells.push(cells.next().unwrap_or_default());
            }
        }
        Ok(Self { columns, height })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Append a column. Its length must match the table height.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.columns.is_empty() && self.height == 0 {
            self.height = column.len();
        } else if column.len() != self.height {
            let found = column.len();
            return Err(ModelError::RaggedColumn {
                column: column.name,
                expected: self.height,
                found,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Set every cell of `name` to `value`, creating the column at the end
    /// of the table if absent. Returns the number of cells that changed.
    pub fn set_constant_column(&mut self, name: &str, value: &Cell) -> usize {
        match self.column_mut(name) {
            Some(column) => {
                let mut fill = |_: &Cell| Some(value.clone());
                rewrite_cells(column.cells.iter_mut(), &mut fill)
            }
            None => {
                self.columns
                    .push(Column::constant(name, value, self.height));
                self.height
            }
        }
    }

    /// Create `name` filled with `value` when the table has no such column.
    /// Returns true if the column was created.
    pub fn ensure_column(&mut self, name: &str, value: &Cell) -> bool {
        if self.has_column(name) {
            return false;
        }
        self.columns
            .push(Column::constant(name, value, self.height));
        true
    }

    /// Rewrite column names. `rename` returns the new name, or `None` to
    /// keep the current one. Returns the number of columns renamed.
    pub fn rename_columns<F>(&mut self, mut rename: F) -> usize
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut renamed = 0;
        for column in &mut self.columns {
            if let Some(new_name) = rename(&column.name)
                && new_name != column.name
            {
                column.name = new_name;
                renamed += 1;
            }
        }
        renamed
    }

    /// Apply `update` to every cell of column `name`, if it exists.
    ///
    /// `update` returns the replacement value, or `None` to leave the cell
    /// alone. Returns `None` when the column is absent, otherwise the number
    /// of cells whose value actually changed.
    pub fn update_column<F>(&mut self, name: &str, mut update: F) -> Option<usize>
    where
        F: FnMut(&Cell) -> Option<Cell>,
    {
        let column = self.column_mut(name)?;
        Some(rewrite_cells(column.cells.iter_mut(), &mut update))
    }

    /// Apply `update` to cells of `target` on rows where `predicate` holds for
    /// the same row of `source`.
    ///
    /// Returns `None` unless both columns exist, otherwise the number of
    /// target cells whose value changed.
    pub fn update_column_where<P, F>(
        &mut self,
        target: &str,
        source: &str,
        mut predicate: P,
        mut update: F,
    ) -> Option<usize>
    where
        P: FnMut(&Cell) -> bool,
        F: FnMut(&Cell) -> Option<Cell>,
    {
        let mask: Vec<bool> = self
            .column(source)?
            .cells
            .iter()
            .map(&mut predicate)
            .collect();
        let column = self.column_mut(target)?;
        let selected = column
            .cells
            .iter_mut()
            .zip(mask)
            .filter_map(|(cell, keep)| keep.then_some(cell));
        Some(rewrite_cells(selected, &mut update))
    }

    /// Cells of one row in column order.
    ///
    /// `None` past the last row, or when a column edited through
    /// [`Table::column_mut`] no longer reaches `index`.
    pub fn row(&self, index: usize) -> Option<Vec<&Cell>> {
        if index >= self.height {
            return None;
        }
        self.columns.iter().map(|c| c.cells.get(index)).collect()
    }
}

fn rewrite_cells<'a, I, F>(cells: I, update: &mut F) -> usize
where
    I: Iterator<Item = &'a mut Cell>,
    F: FnMut(&Cell) -> Option<Cell>,
{
    let mut changed = 0;
    for cell in cells {
        if let Some(next) = update(cell)
            && next != *cell
        {
            *cell = next;
            changed += 1;
        }
    }
    changed
}
