//! Expense CLI commands
//!
//! Add, list, edit and delete. Handlers return the text to show so the
//! interactive menu can reuse them.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_expense_list, format_expense_row};
use crate::error::ExpenseResult;
use crate::services::{ExpenseEdit, ExpenseService};

/// Expense subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// Amount spent (e.g. "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category (e.g. Food, Transport, Entertainment)
        category: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List all expenses with their index numbers
    #[command(alias = "view")]
    List,

    /// Edit an expense; omitted fields are left unchanged
    Edit {
        /// Index from `list` (starting at 1)
        index: usize,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Index from `list` (starting at 1)
        index: usize,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    service: &mut ExpenseService,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<String> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
        } => {
            let expense = service.add(&amount, &category, date.as_deref())?;
            let index = service.position_of(expense.id).unwrap_or(service.count());
            Ok(format!(
                "Expense added successfully!\n  {}\n",
                format_expense_row(index, &expense, symbol)
            ))
        }

        ExpenseCommands::List => Ok(format_expense_list(service.list(), symbol)),

        ExpenseCommands::Edit {
            index,
            amount,
            category,
            date,
        } => {
            let mut changes = ExpenseEdit::new();
            if let Some(amount) = amount {
                changes = changes.amount(amount);
            }
            if let Some(category) = category {
                changes = changes.category(category);
            }
            if let Some(date) = date {
                changes = changes.date(date);
            }
            let expense = service.edit(index, changes)?;
            Ok(format!(
                "Expense updated successfully!\n  {}\n",
                format_expense_row(index, &expense, symbol)
            ))
        }

        ExpenseCommands::Delete { index } => {
            let removed = service.delete(index)?;
            Ok(format!(
                "Deleted expense: {}\n",
                format_expense_row(index, &removed, symbol)
            ))
        }
    }
}
