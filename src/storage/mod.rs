//! Storage layer for the expense tracker
//!
//! Provides JSON file storage with atomic writes and soft-fail loading.

pub mod expenses;
pub mod file_io;

pub use expenses::{ExpenseRepository, LoadOutcome};
pub use file_io::{read_json_value, write_json_atomic, JsonRead};
