//! Export module for the expense tracker
//!
//! CSV output for the expense list (spreadsheet-compatible).

pub mod csv;

pub use self::csv::export_expenses_csv;
