//! Aggregations over the expense list
//!
//! Pure functions of a slice of expenses. Nothing here reads or writes the
//! data file, and every function accepts an empty slice.

use std::collections::{BTreeMap, HashMap};

use chrono::{Days, NaiveDate};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, Money};

/// Length of the weekly window added to the start date.
///
/// The window is inclusive on both ends, so it spans eight calendar days:
/// an expense dated exactly seven days after the start is counted.
pub const WEEK_SPAN_DAYS: u64 = 7;

/// Total spent in one category; the query is normalized like stored categories
pub fn total_by_category(expenses: &[Expense], category: &Category) -> Money {
    expenses
        .iter()
        .filter(|e| &e.category == category)
        .map(|e| e.amount)
        .sum()
}

pub fn total_overall(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// Totals per calendar day, ascending by date
pub fn total_by_day(expenses: &[Expense]) -> BTreeMap<NaiveDate, Money> {
    let mut by_day = BTreeMap::new();
    for expense in expenses {
        *by_day.entry(expense.date).or_insert_with(Money::zero) += expense.amount;
    }
    by_day
}

/// Expenses dated within `start..=end`, in listing order
pub fn filter_by_date_range(expenses: &[Expense], start: NaiveDate, end: NaiveDate) -> Vec<&Expense> {
    expenses
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
        .collect()
}

/// Total for `start..=start + 7 days`
pub fn total_for_week(expenses: &[Expense], start: NaiveDate) -> Money {
    let end = start
        .checked_add_days(Days::new(WEEK_SPAN_DAYS))
        .unwrap_or(NaiveDate::MAX);
    filter_by_date_range(expenses, start, end)
        .into_iter()
        .map(|e| e.amount)
        .sum()
}

/// First and last calendar day of a month
pub fn month_bounds(month: u32, year: i32) -> ExpenseResult<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return Err(ExpenseError::InvalidMonth(month));
    }

    let out_of_range = || ExpenseError::InvalidDate(format!("{}-{:02}", year, month));
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next_first
        .and_then(|d| d.pred_opt())
        .ok_or_else(out_of_range)?;

    Ok((first, last))
}

/// Total for one calendar month
pub fn total_for_month(expenses: &[Expense], month: u32, year: i32) -> ExpenseResult<Money> {
    let (first, last) = month_bounds(month, year)?;
    Ok(filter_by_date_range(expenses, first, last)
        .into_iter()
        .map(|e| e.amount)
        .sum())
}

/// Total spent per category, for charting
pub fn category_totals(expenses: &[Expense]) -> HashMap<Category, Money> {
    let mut totals = HashMap::new();
    for expense in expenses {
        *totals
            .entry(expense.category.clone())
            .or_insert_with(Money::zero) += expense.amount;
    }
    totals
}
