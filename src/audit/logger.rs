//! Expense history log
//!
//! One JSON line per add, edit or delete, appended next to the data file.
//! The log is informational: a line that cannot be parsed (for example one
//! cut short by a crash) is skipped with a warning instead of hiding the
//! rest of the history.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{ExpenseError, ExpenseResult};

use super::entry::AuditEntry;

/// Appends and reads expense change entries (JSONL)
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry as one line
    pub fn log(&self, entry: &AuditEntry) -> ExpenseResult<()> {
        let line = serde_json::to_string(entry)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| self.io_error("open", e))?;

        // Entry and newline go out in a single write
        file.write_all(format!("{}\n", line).as_bytes())
            .map_err(|e| self.io_error("append to", e))
    }

    /// Every readable entry, oldest first
    pub fn read_all(&self) -> ExpenseResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.for_each_entry(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` readable entries, oldest first
    pub fn read_recent(&self, count: usize) -> ExpenseResult<Vec<AuditEntry>> {
        let mut tail = VecDeque::with_capacity(count.min(256));
        self.for_each_entry(|entry| {
            if count == 0 {
                return;
            }
            if tail.len() == count {
                tail.pop_front();
            }
            tail.push_back(entry);
        })?;
        Ok(tail.into())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    fn for_each_entry(&self, mut visit: impl FnMut(AuditEntry)) -> ExpenseResult<()> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(self.io_error("open", e)),
        };

        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| self.io_error("read", e))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditEntry>(&line) {
                Ok(entry) => visit(entry),
                Err(e) => warn!(
                    path = %self.log_path.display(),
                    line = number + 1,
                    error = %e,
                    "skipping unreadable history entry"
                ),
            }
        }
        Ok(())
    }

    fn io_error(&self, action: &str, err: std::io::Error) -> ExpenseError {
        ExpenseError::Io(format!(
            "Failed to {} history log {}: {}",
            action,
            self.log_path.display(),
            err
        ))
    }
}
