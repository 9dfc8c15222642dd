//! CLI command for exporting the expense list

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::export_expenses_csv;
use crate::models::Expense;

/// Write every expense to a CSV file
pub fn handle_export_command(expenses: &[Expense], output: &Path) -> ExpenseResult<String> {
    let file = File::create(output).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;

    export_expenses_csv(expenses, BufWriter::new(file))?;

    Ok(format!(
        "Exported {} expense(s) to: {}\n",
        expenses.len(),
        output.display()
    ))
}
