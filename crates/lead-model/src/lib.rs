//! Data model for lead spreadsheets.
//!
//! A [`Table`] is an ordered list of named [`Column`]s over an ordered list
//! of rows. Cells are loosely typed through the [`Cell`] tagged union, so
//! "missing" (`Null`) is always an explicit branch.

pub mod cell;
pub mod error;
pub mod table;

pub use cell::{Cell, format_datetime, format_number};
pub use error::{ModelError, Result};
pub use table::{Column, Table};
