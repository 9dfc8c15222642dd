//! Expense model
//!
//! One expense entry: a positive amount, a category and a calendar date.
//! On disk each entry has exactly those three fields; the id exists only in
//! memory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;

/// Date format used for input and persistence
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single expense record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// In-memory handle that survives index shifts; regenerated on load
    #[serde(skip)]
    pub id: ExpenseId,

    /// Amount spent, always positive
    pub amount: Money,

    /// Normalized category
    pub category: Category,

    /// Day the money was spent
    pub date: NaiveDate,
}

impl Expense {
    /// Create a new expense with a fresh id
    pub fn new(amount: Money, category: Category, date: NaiveDate) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            category,
            date,
        }
    }

    /// Compare the persisted values, ignoring the in-memory id
    pub fn same_entry(&self, other: &Expense) -> bool {
        self.amount == other.amount && self.category == other.category && self.date == other.date
    }

    /// Validate the expense
    ///
    /// Entries made through the service always pass. Records read from disk
    /// may not, and are kept anyway.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.category.is_blank() {
            return Err(ExpenseValidationError::BlankCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {}",
            self.date.format(DATE_FORMAT),
            self.category,
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    BlankCategory,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "amount must be greater than zero, got {}", amount)
            }
            Self::BlankCategory => write!(f, "category is blank"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
