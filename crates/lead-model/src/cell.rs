//! Loosely-typed spreadsheet cell values.

use std::borrow::Cow;
use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single cell value in a lead table.
///
/// Spreadsheet cells are loosely typed: a column may mix text, numbers,
/// booleans and dates, and any cell may be blank. `Null` is the only
/// "missing" state; an empty string is present text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Cell {
    /// Text value.
    Text(String),
    /// Numeric value (integers are stored as whole floats).
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Date or date-time value; dates are stored at midnight.
    DateTime(NaiveDateTime),
    /// Blank or missing value.
    #[default]
    Null,
}

impl Cell {
    /// Build a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns true for a blank/missing cell.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the value of a text cell. Every other kind returns `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Number(_) | Self::Bool(_) | Self::DateTime(_) | Self::Null => None,
        }
    }

    /// Returns true if this is a text cell exactly equal to `expected`.
    pub fn is_text(&self, expected: &str) -> bool {
        self.as_str() == Some(expected)
    }

    /// Textual form of the cell, used by rules that compare values as text.
    ///
    /// Whole numbers render without a fractional part so that phone numbers
    /// and codes stored as numbers read back the way they were typed.
    /// Booleans render as `TRUE`/`FALSE` and dates through
    /// [`format_datetime`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lead_model::Cell;
    ///
    /// assert_eq!(Cell::text("QC").to_text().as_deref(), Some("QC"));
    /// assert_eq!(Cell::Number(5145551234.0).to_text().as_deref(), Some("5145551234"));
    /// assert_eq!(Cell::Number(2.5).to_text().as_deref(), Some("2.5"));
    /// assert_eq!(Cell::Null.to_text(), None);
    /// ```
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(value) => Some(Cow::Borrowed(value)),
            Self::Number(value) => Some(Cow::Owned(format_number(*value))),
            Self::Bool(value) => Some(Cow::Borrowed(format_bool(*value))),
            Self::DateTime(value) => Some(Cow::Owned(format_datetime(*value))),
            Self::Null => None,
        }
    }
}

/// Render a number the way a spreadsheet user would expect to read it.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Render a date-time; midnight values render as a bare date.
pub fn format_datetime(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

fn format_bool(value: bool) -> &'static str {
    if value { "TRUE" } else { "FALSE" }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
