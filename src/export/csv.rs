//! CSV Export functionality
//!
//! Writes the expense list in listing order with its 1-based index, so the
//! spreadsheet rows line up with `expenses list`.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, DATE_FORMAT};

/// Export all expenses to CSV
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> ExpenseResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["Index", "Date", "Category", "Amount"])?;

    for (i, expense) in expenses.iter().enumerate() {
        csv_writer.write_record([
            (i + 1).to_string(),
            expense.date.format(DATE_FORMAT).to_string(),
            expense.category.as_str().to_string(),
            format!("{:.2}", expense.amount.as_decimal()),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_export_expenses() {
        let expenses = vec![
            Expense::new(
                Money::from_cents(1250),
                Category::new("food").unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ),
            Expense::new(
                Money::from_cents(500),
                Category::new("books, magazines").unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            ),
        ];

        let mut buffer = Vec::new();
        export_expenses_csv(&expenses, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(
            text,
            "Index,Date,Category,Amount\n\
             1,2024-03-01,Food,12.50\n\
             2,2024-03-02,\"Books, magazines\",5.00\n"
        );
    }

    #[test]
    fn test_export_empty() {
        let mut buffer = Vec::new();
        export_expenses_csv(&[], &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "Index,Date,Category,Amount\n");
    }
}
