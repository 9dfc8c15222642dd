//! Expense display formatting
//!
//! Terminal output for the expense listing and the per-day totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Expense, Money, DATE_FORMAT};

/// Format a single listing row; `index` is 1-based
pub fn format_expense_row(index: usize, expense: &Expense, currency_symbol: &str) -> String {
    format!(
        "{}. {} - {} - {}",
        index,
        expense.date.format(DATE_FORMAT),
        expense.category,
        expense.amount.format_with_symbol(currency_symbol)
    )
}

/// Format the full expense listing, numbered from 1
pub fn format_expense_list(expenses: &[Expense], currency_symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::from("--- Expenses ---\n");
    for (i, expense) in expenses.iter().enumerate() {
        output.push_str(&format_expense_row(i + 1, expense, currency_symbol));
        output.push('\n');
    }
    output
}

/// Format per-day totals, one line per day in ascending order
pub fn format_daily_totals(by_day: &BTreeMap<NaiveDate, Money>, currency_symbol: &str) -> String {
    if by_day.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    for (date, total) in by_day {
        output.push_str(&format!(
            "{}: {}\n",
            date.format(DATE_FORMAT),
            total.format_with_symbol(currency_symbol)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn expense(cents: i64, category: &str, day: u32) -> Expense {
        Expense::new(
            Money::from_cents(cents),
            Category::new(category).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        )
    }

    #[test]
    fn test_list_is_one_based() {
        let text = format_expense_list(&[expense(1250, "food", 1), expense(300, "bus", 2)], "$");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "1. 2024-03-01 - Food - $12.50");
        assert_eq!(lines[2], "2. 2024-03-02 - Bus - $3.00");
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_expense_list(&[], "$"), "No expenses found.\n");
    }

    #[test]
    fn test_daily_totals() {
        let mut by_day = BTreeMap::new();
        by_day.insert(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(), Money::from_cents(300));
        by_day.insert(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), Money::from_cents(1250));

        assert_eq!(
            format_daily_totals(&by_day, "£"),
            "2024-03-01: £12.50\n2024-03-02: £3.00\n"
        );
    }
}
