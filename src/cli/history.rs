//! CLI command for reading the audit log

use crate::audit::AuditLogger;
use crate::error::ExpenseResult;

/// Show the most recent audit entries, oldest first
pub fn handle_history_command(logger: &AuditLogger, limit: usize) -> ExpenseResult<String> {
    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        return Ok("No history recorded.\n".to_string());
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditEntry;
    use crate::models::{Category, Expense, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_history_limit() {
        let temp = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp.path().join("audit.log"));
        assert_eq!(
            handle_history_command(&logger, 5).unwrap(),
            "No history recorded.\n"
        );

        let expense = Expense::new(
            Money::from_cents(100),
            Category::new("tea").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        );
        logger.log(&AuditEntry::create(1, &expense)).unwrap();
        logger.log(&AuditEntry::delete(1, &expense)).unwrap();

        let out = handle_history_command(&logger, 1).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("DELETE #1 2024-01-02 - Tea - $1.00"));
    }
}
