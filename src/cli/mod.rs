//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod export;
pub mod history;
pub mod menu;
pub mod summary;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::handle_export_command;
pub use history::handle_history_command;
pub use menu::{run_menu, MenuChoice};
pub use summary::{handle_summary_command, render_chart, SummaryCommands};
