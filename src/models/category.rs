//! Expense category
//!
//! Categories are free-form and user-defined. The only rule is capitalization:
//! the first character is upper-cased and the rest lower-cased, so "food",
//! "FOOD" and "fOOD" are all the same category "Food".
//!
//! User input must name a category. Records already on disk may carry a blank
//! one; those are read back as-is so the rest of the file is not lost.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ExpenseError, ExpenseResult};

/// A normalized category name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Normalize a raw category name
    ///
    /// Surrounding whitespace is dropped; a blank name is rejected.
    pub fn new(raw: &str) -> ExpenseResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ExpenseError::MissingCategory);
        }
        Ok(Self(capitalize(trimmed)))
    }

    /// Normalize a stored category name, keeping a blank one
    pub fn from_stored(raw: &str) -> Self {
        Self(capitalize(raw.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Only possible for records read from disk
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::from_stored(&value)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalization() {
        assert_eq!(Category::new("food").unwrap().as_str(), "Food");
        assert_eq!(Category::new("FOOD").unwrap().as_str(), "Food");
        assert_eq!(Category::new("eating OUT").unwrap().as_str(), "Eating out");
        assert_eq!(Category::new("  transport ").unwrap().as_str(), "Transport");
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(Category::new("épicerie").unwrap().as_str(), "Épicerie");
    }

    #[test]
    fn test_blank_rejected() {
        assert!(matches!(Category::new(""), Err(ExpenseError::MissingCategory)));
        assert!(matches!(Category::new("   "), Err(ExpenseError::MissingCategory)));
    }

    #[test]
    fn test_deserialize_normalizes() {
        let cat: Category = serde_json::from_str("\"rent\"").unwrap();
        assert_eq!(cat.as_str(), "Rent");
        assert!(!cat.is_blank());
    }

    #[test]
    fn test_deserialize_keeps_blank() {
        let cat: Category = serde_json::from_str("\"\"").unwrap();
        assert!(cat.is_blank());
        assert_eq!(serde_json::to_string(&cat).unwrap(), "\"\"");
    }
}
