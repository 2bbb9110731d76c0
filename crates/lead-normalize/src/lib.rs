//! Lead normalization rules.
//!
//! This crate turns an exported sales-lead [`Table`](lead_model::Table)
//! into the cleaned form expected downstream:
//!
//! - **columns**: header names the rules recognize
//! - **rules**: the ordered rule list and its literals
//! - **normalizer**: [`normalize`] and its reporting variants
//! - **report**: per-rule outcomes for logging and summaries
//!
//! Normalization is pure: no I/O, no logging, no shared state.

pub mod columns;
pub mod normalizer;
pub mod report;
pub mod rules;

pub use normalizer::{normalize, normalize_in_place, normalize_with_report};
pub use report::{NormalizeReport, StepOutcome, StepReport};
pub use rules::Rule;
