//! Audit logging for the expense tracker
//!
//! Records every add, edit and delete with before/after values in an
//! append-only JSONL file next to the data file.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
