//! Spending summary
//!
//! One-shot overview of the whole expense list: overall total, date span and
//! per-category breakdown with percentage share.

use std::io::Write;

use chrono::NaiveDate;

use super::totals::{category_totals, total_overall};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, Money};

/// Spending in a single category
#[derive(Debug, Clone)]
pub struct CategorySpending {
    pub category: Category,
    pub total: Money,
    /// Number of expenses in the category
    pub count: usize,
    /// Share of overall spending, 0-100
    pub percentage: f64,
}

/// Spending summary over every expense
#[derive(Debug, Clone)]
pub struct SpendingSummary {
    /// Earliest and latest expense date, if any expenses exist
    pub span: Option<(NaiveDate, NaiveDate)>,
    /// Categories, largest total first (ties by name)
    pub categories: Vec<CategorySpending>,
    pub total: Money,
    pub expense_count: usize,
}

impl SpendingSummary {
    pub fn generate(expenses: &[Expense]) -> Self {
        let total = total_overall(expenses);

        let mut categories: Vec<CategorySpending> = category_totals(expenses)
            .into_iter()
            .map(|(category, amount)| {
                let count = expenses.iter().filter(|e| e.category == category).count();
                let percentage = if total.is_zero() {
                    0.0
                } else {
                    amount.cents() as f64 / total.cents() as f64 * 100.0
                };
                CategorySpending {
                    category,
                    total: amount,
                    count,
                    percentage,
                }
            })
            .collect();

        categories.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.cmp(&b.category))
        });

        let span = expenses
            .iter()
            .map(|e| e.date)
            .min()
            .zip(expenses.iter().map(|e| e.date).max());

        Self {
            span,
            categories,
            total,
            expense_count: expenses.len(),
        }
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        match self.span {
            Some((first, last)) => {
                output.push_str(&format!("Spending Summary: {} to {}\n", first, last))
            }
            None => output.push_str("Spending Summary\n"),
        }
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Spending: {}\n",
            self.total.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!("Total Expenses: {}\n\n", self.expense_count));

        output.push_str(&format!(
            "{:<30} {:>12} {:>6} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<30} {:>12} {:>6} {:>7.1}%\n",
                row.category.as_str(),
                row.total.format_with_symbol(currency_symbol),
                row.count,
                row.percentage
            ));
        }

        output
    }

    /// Export the per-category breakdown as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["Category", "Amount", "Count", "Percentage"])?;

        for row in &self.categories {
            csv_writer.write_record([
                row.category.as_str().to_string(),
                format!("{:.2}", row.total.as_decimal()),
                row.count.to_string(),
                format!("{:.2}", row.percentage),
            ])?;
        }

        csv_writer
            .flush()
            .map_err(|e| ExpenseError::Export(e.to_string()))
    }
}
