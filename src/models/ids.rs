//! Stable identifier for expense records
//!
//! Positions in the listing shift when an earlier record is deleted; the id
//! does not. Ids live only in memory and are regenerated on every load.

use std::fmt;
use uuid::Uuid;

/// Identifier assigned to an expense when it is created or loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpenseId(Uuid);

const DISPLAY_PREFIX: &str = "exp-";

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISPLAY_PREFIX, &self.0.to_string()[..8])
    }
}
