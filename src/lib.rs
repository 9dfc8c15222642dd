//! Expense Tracker - personal expense tracking from the terminal
//!
//! This library provides the core functionality for the `expenses` binary:
//! a persisted, ordered list of expenses (amount, category, date) and the
//! aggregations over it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, categories, expenses)
//! - `storage`: JSON file storage layer
//! - `services`: Validated add/edit/delete over the stored list
//! - `reports`: Totals by category, day, week and month
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting and the category chart
//! - `export`: CSV export
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{ExpensePaths, Settings};
//! use expense_tracker::services::ExpenseService;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let (mut service, _outcome) = ExpenseService::open(&paths, &settings)?;
//! service.add("12.50", "food", Some("2024-03-01"))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
