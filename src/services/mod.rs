//! Service layer for the expense tracker
//!
//! The service layer provides validation and persist-after-mutate semantics
//! on top of the storage layer.

pub mod expense;

pub use expense::{parse_amount, parse_date, ExpenseEdit, ExpenseService};
