//! Core data models for the expense tracker
//!
//! An expense is an amount, a category and a date. Everything else in the
//! crate is persistence or arithmetic over a list of these.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::Category;
pub use expense::{Expense, ExpenseValidationError, DATE_FORMAT};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError, MAX_AMOUNT_CENTS};
