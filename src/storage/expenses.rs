//! Expense repository for JSON storage
//!
//! Holds the ordered expense list and mirrors it to `expenses.json`, a plain
//! JSON array of `{amount, category, date}` objects. Order in memory is the
//! order on disk and the order shown to the user.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::ExpenseError;
use crate::models::Expense;

use super::file_io::{read_json_value, write_json_atomic, JsonRead};

/// What `load` found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No data file yet; starting empty
    Absent,
    /// A data file exists but could not be used; starting empty
    ///
    /// `backup` is where the unreadable file was copied before anything can
    /// overwrite it.
    Corrupt {
        reason: String,
        backup: Option<PathBuf>,
    },
    /// Records were read successfully
    Loaded { count: usize },
}

impl LoadOutcome {
    /// Whether existing data was discarded
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "No previous expense data found. Starting fresh."),
            Self::Corrupt { reason, backup } => {
                write!(f, "Expense data could not be read ({}).", reason)?;
                if let Some(backup) = backup {
                    write!(f, " The file was copied to {}.", backup.display())?;
                }
                write!(f, " Starting empty.")
            }
            Self::Loaded { count } => write!(f, "Loaded {} expense(s).", count),
        }
    }
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    expenses: Vec<Expense>,
}

impl ExpenseRepository {
    /// Create an empty repository bound to a file; nothing is read yet
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            expenses: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory list with the file's content
    ///
    /// A missing, malformed or wrongly shaped file leaves the list empty and
    /// is reported through the returned outcome.
    pub fn load(&mut self) -> Result<LoadOutcome, ExpenseError> {
        self.expenses.clear();

        let value = match read_json_value(&self.path)? {
            JsonRead::Missing => {
                debug!(path = %self.path.display(), "no expense file");
                return Ok(LoadOutcome::Absent);
            }
            JsonRead::Malformed(reason) => {
                return Ok(self.corrupt(format!("invalid JSON: {}", reason)));
            }
            JsonRead::Value(value) => value,
        };

        if !value.is_array() {
            return Ok(self.corrupt("expected a list of expenses".to_string()));
        }

        match serde_json::from_value::<Vec<Expense>>(value) {
            Ok(expenses) => {
                for (i, expense) in expenses.iter().enumerate() {
                    if let Err(e) = expense.validate() {
                        warn!(index = i + 1, expense = %expense, reason = %e, "stored expense is not valid");
                    }
                }
                self.expenses = expenses;
                debug!(count = self.expenses.len(), "loaded expenses");
                Ok(LoadOutcome::Loaded {
                    count: self.expenses.len(),
                })
            }
            Err(e) => Ok(self.corrupt(format!("malformed expense record: {}", e))),
        }
    }

    fn corrupt(&self, reason: String) -> LoadOutcome {
        warn!(path = %self.path.display(), %reason, "discarding unreadable expense file");
        let backup = match self.preserve_unreadable() {
            Ok(backup) => Some(backup),
            Err(e) => {
                warn!(error = %e, "could not copy unreadable expense file");
                None
            }
        };
        LoadOutcome::Corrupt { reason, backup }
    }

    /// Copy the current file to `<name>.corrupt-<timestamp>` beside it
    fn preserve_unreadable(&self) -> Result<PathBuf, ExpenseError> {
        let now = Utc::now();
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "expenses.json".to_string());
        let backup = self.path.with_file_name(format!(
            "{}.corrupt-{}-{:03}",
            file_name,
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        ));

        fs::copy(&self.path, &backup).map_err(|e| {
            ExpenseError::Storage(format!("Failed to copy {}: {}", self.path.display(), e))
        })?;
        Ok(backup)
    }

    /// Write the full list to disk, overwriting the previous content
    pub fn save(&self) -> Result<(), ExpenseError> {
        write_json_atomic(&self.path, &self.expenses)?;
        debug!(count = self.expenses.len(), path = %self.path.display(), "saved expenses");
        Ok(())
    }

    /// All expenses in display order
    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    /// Get an expense by 0-based position
    pub fn get(&self, position: usize) -> Option<&Expense> {
        self.expenses.get(position)
    }

    /// Get an expense by 0-based position for modification
    pub fn get_mut(&mut self, position: usize) -> Option<&mut Expense> {
        self.expenses.get_mut(position)
    }

    /// Append an expense
    pub fn push(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Put an expense back at a 0-based position (clamped to the end)
    pub fn insert(&mut self, position: usize, expense: Expense) {
        let position = position.min(self.expenses.len());
        self.expenses.insert(position, expense);
    }

    /// Remove the expense at a 0-based position, shifting later ones down
    pub fn remove(&mut self, position: usize) -> Option<Expense> {
        (position < self.expenses.len()).then(|| self.expenses.remove(position))
    }

    pub fn count(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}
