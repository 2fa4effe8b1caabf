//! traineval-sheet
//!
//! Workbook loading: turns uploaded spreadsheet bytes into an
//! [`EvaluationTable`](traineval_core::models::table::EvaluationTable).

pub mod error;
pub mod loader;

/// Sheet holding the per-respondent answers in evaluation exports.
pub const DEFAULT_SHEET: &str = "Summary";
