//! Display formatting for terminal output

pub mod chart;
pub mod expense;

pub use chart::{ChartRenderer, TextBarChart};
pub use expense::{format_daily_totals, format_expense_list, format_expense_row};
