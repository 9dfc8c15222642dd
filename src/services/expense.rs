//! Expense service
//!
//! Owns the expense list and is the only way to change it. Every mutation is
//! validated in full before anything is touched, then written to disk before
//! the call returns. Indexes on this surface are 1-based.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{ExpensePaths, Settings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{
    Category, Expense, ExpenseId, Money, MoneyParseError, DATE_FORMAT, MAX_AMOUNT_CENTS,
};
use crate::storage::{ExpenseRepository, LoadOutcome};

/// Requested changes for an edit; `None` or blank leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct ExpenseEdit {
    pub amount: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl ExpenseEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Parse a user-entered amount
///
/// Amounts are rounded to the nearest cent, and the rounded value must be
/// at least one cent and no more than [`MAX_AMOUNT_CENTS`].
pub fn parse_amount(raw: &str) -> ExpenseResult<Money> {
    let amount = Money::parse(raw).map_err(|e| match e {
        MoneyParseError::InvalidFormat(_) => ExpenseError::InvalidAmount(raw.trim().to_string()),
        out_of_range => ExpenseError::InvalidAmount(out_of_range.to_string()),
    })?;
    if !amount.is_positive() {
        return Err(ExpenseError::InvalidAmount(format!(
            "{} (must be at least {} after rounding to cents)",
            raw.trim(),
            Money::from_cents(1)
        )));
    }
    Ok(amount)
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(raw: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ExpenseError::InvalidDate(raw.trim().to_string()))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Service for expense management
pub struct ExpenseService {
    repository: ExpenseRepository,
    audit: Option<AuditLogger>,
}

impl ExpenseService {
    /// Wrap an already-loaded repository
    pub fn new(repository: ExpenseRepository, audit: Option<AuditLogger>) -> Self {
        Self { repository, audit }
    }

    /// Open the expense file named by `paths` and load it
    pub fn open(paths: &ExpensePaths, settings: &Settings) -> ExpenseResult<(Self, LoadOutcome)> {
        let mut repository = ExpenseRepository::new(paths.expenses_file());
        let outcome = repository.load()?;
        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));
        Ok((Self::new(repository, audit), outcome))
    }

    /// All expenses in display order
    pub fn list(&self) -> &[Expense] {
        self.repository.all()
    }

    pub fn count(&self) -> usize {
        self.repository.count()
    }

    /// Get an expense by its 1-based listing index
    pub fn get(&self, index: usize) -> ExpenseResult<&Expense> {
        let position = self.position(index)?;
        self.repository
            .get(position)
            .ok_or_else(|| ExpenseError::index_out_of_range(index, self.count()))
    }

    /// Current 1-based listing index of an expense
    pub fn position_of(&self, id: ExpenseId) -> Option<usize> {
        self.list().iter().position(|e| e.id == id).map(|p| p + 1)
    }

    /// Add an expense; the date defaults to today
    pub fn add(
        &mut self,
        amount: &str,
        category: &str,
        date: Option<&str>,
    ) -> ExpenseResult<Expense> {
        let today = Local::now().date_naive();
        self.add_with_default_date(amount, category, date, today)
    }

    /// Add an expense, using `today` when no date is given
    pub fn add_with_default_date(
        &mut self,
        amount: &str,
        category: &str,
        date: Option<&str>,
        today: NaiveDate,
    ) -> ExpenseResult<Expense> {
        let amount = parse_amount(amount)?;
        let category = Category::new(category)?;
        let date = match date.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => parse_date(raw)?,
            None => today,
        };

        let expense = Expense::new(amount, category, date);
        self.repository.push(expense.clone());

        if let Err(e) = self.repository.save() {
            self.repository.remove(self.repository.count() - 1);
            return Err(e);
        }

        let position = self.count();
        info!(%position, %expense, "expense added");
        self.record(AuditEntry::create(position, &expense));

        Ok(expense)
    }

    /// Edit the expense at a 1-based index
    ///
    /// Every provided field is validated before the record changes. An edit
    /// with nothing provided still succeeds and leaves the record as it was.
    pub fn edit(&mut self, index: usize, changes: ExpenseEdit) -> ExpenseResult<Expense> {
        let position = self.position(index)?;

        let amount = non_blank(&changes.amount).map(parse_amount).transpose()?;
        let category = non_blank(&changes.category).map(Category::new).transpose()?;
        let date = non_blank(&changes.date).map(parse_date).transpose()?;

        let len = self.count();
        let slot = self
            .repository
            .get_mut(position)
            .ok_or_else(|| ExpenseError::index_out_of_range(index, len))?;
        let before = slot.clone();

        if let Some(amount) = amount {
            slot.amount = amount;
        }
        if let Some(category) = category {
            slot.category = category;
        }
        if let Some(date) = date {
            slot.date = date;
        }
        let after = slot.clone();

        if let Err(e) = self.repository.save() {
            if let Some(slot) = self.repository.get_mut(position) {
                *slot = before;
            }
            return Err(e);
        }

        let diff = describe_changes(&before, &after);
        info!(%index, changes = diff.as_deref().unwrap_or("none"), "expense edited");
        self.record(AuditEntry::update(index, &before, &after, diff));

        Ok(after)
    }

    /// Delete the expense at a 1-based index; later expenses move up by one
    pub fn delete(&mut self, index: usize) -> ExpenseResult<Expense> {
        let position = self.position(index)?;

        let removed = self
            .repository
            .remove(position)
            .ok_or_else(|| ExpenseError::index_out_of_range(index, self.count()))?;

        if let Err(e) = self.repository.save() {
            self.repository.insert(position, removed);
            return Err(e);
        }

        info!(%index, expense = %removed, "expense deleted");
        self.record(AuditEntry::delete(index, &removed));

        Ok(removed)
    }

    /// Convert a 1-based index into a 0-based position
    fn position(&self, index: usize) -> ExpenseResult<usize> {
        let len = self.count();
        match index.checked_sub(1) {
            Some(position) if position < len => Ok(position),
            _ => Err(ExpenseError::index_out_of_range(index, len)),
        }
    }

    /// The data file is already written; an audit failure is only reported
    fn record(&self, entry: AuditEntry) {
        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log(&entry) {
                warn!(error = %e, path = %audit.path().display(), "failed to write audit entry");
            }
        }
    }
}

fn describe_changes(before: &Expense, after: &Expense) -> Option<String> {
    let mut changes = Vec::new();
    if before.amount != after.amount {
        changes.push(format!("amount: {} -> {}", before.amount, after.amount));
    }
    if before.category != after.category {
        changes.push(format!("category: {} -> {}", before.category, after.category));
    }
    if before.date != after.date {
        changes.push(format!("date: {} -> {}", before.date, after.date));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_service() -> (TempDir, ExpenseService) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let (service, outcome) = ExpenseService::open(&paths, &Settings::default()).unwrap();
        assert_eq!(outcome, LoadOutcome::Absent);
        (temp_dir, service)
    }

    fn reload(temp_dir: &TempDir) -> ExpenseService {
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        ExpenseService::open(&paths, &Settings::default()).unwrap().0
    }

    fn seed(service: &mut ExpenseService) {
        service.add("10", "food", Some("2024-03-01")).unwrap();
        service.add("20", "bus", Some("2024-03-02")).unwrap();
        service.add("30", "rent", Some("2024-03-03")).unwrap();
    }

    #[test]
    fn test_add_normalizes_and_persists() {
        let (temp_dir, mut service) = create_test_service();

        let expense = service.add("12.50", "food", Some("2024-03-01")).unwrap();
        assert_eq!(expense.category.as_str(), "Food");
        assert_eq!(expense.amount.cents(), 1250);

        let reloaded = reload(&temp_dir);
        assert_eq!(reloaded.count(), 1);
        assert!(reloaded.list()[0].same_entry(&expense));
    }

    #[test]
    fn test_add_defaults_to_today() {
        let (_temp_dir, mut service) = create_test_service();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let expense = service
            .add_with_default_date("5", "coffee", None, today)
            .unwrap();
        assert_eq!(expense.date, today);

        let blank = service
            .add_with_default_date("5", "coffee", Some("  "), today)
            .unwrap();
        assert_eq!(blank.date, today);
    }

    #[test]
    fn test_add_rejects_bad_input_without_writing() {
        let (temp_dir, mut service) = create_test_service();
        let data_file = temp_dir.path().join("expenses.json");

        assert!(matches!(
            service.add("abc", "food", None),
            Err(ExpenseError::InvalidAmount(_))
        ));
        assert!(matches!(
            service.add("0", "food", None),
            Err(ExpenseError::InvalidAmount(_))
        ));
        assert!(matches!(
            service.add("-4", "food", None),
            Err(ExpenseError::InvalidAmount(_))
        ));
        assert!(matches!(
            service.add("4", "food", Some("2024-02-30")),
            Err(ExpenseError::InvalidDate(_))
        ));
        assert!(matches!(
            service.add("4", "food", Some("03/01/2024")),
            Err(ExpenseError::InvalidDate(_))
        ));
        assert!(matches!(
            service.add("4", " ", None),
            Err(ExpenseError::MissingCategory)
        ));

        assert_eq!(service.count(), 0);
        assert!(!data_file.exists());
    }

    #[test]
    fn test_sub_cent_amount_reports_rounding() {
        let (_temp_dir, mut service) = create_test_service();

        match service.add("0.004", "food", None) {
            Err(ExpenseError::InvalidAmount(msg)) => {
                assert!(msg.contains("at least $0.01 after rounding"), "{}", msg)
            }
            other => panic!("unexpected result: {:?}", other.map(|e| e.to_string())),
        }
        assert_eq!(service.add("0.005", "food", None).unwrap().amount.cents(), 1);
    }

    #[test]
    fn test_amount_limit_keeps_totals_exact() {
        let (_temp_dir, mut service) = create_test_service();

        assert!(matches!(
            service.add("90000000000000000", "rent", None),
            Err(ExpenseError::InvalidAmount(_))
        ));

        service.add("100000000000", "rent", Some("2024-01-01")).unwrap();
        service.add("100000000000", "rent", Some("2024-01-02")).unwrap();
        let total = crate::reports::total_overall(service.list());
        assert_eq!(total.cents(), 2 * MAX_AMOUNT_CENTS);
    }

    #[test]
    fn test_blank_stored_category_survives_add() {
        let temp_dir = TempDir::new().unwrap();
        let data_file = temp_dir.path().join("expenses.json");
        fs::write(
            &data_file,
            r#"[{"amount": 40.0, "category": "Rent", "date": "2024-03-01"},
                {"amount": 5.0, "category": "", "date": "2024-03-02"},
                {"amount": 12.5, "category": "Food", "date": "2024-03-03"}]"#,
        )
        .unwrap();

        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let (mut service, outcome) = ExpenseService::open(&paths, &Settings::default()).unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded { count: 3 });

        service.add("1", "tea", Some("2024-03-04")).unwrap();

        let reloaded = reload(&temp_dir);
        assert_eq!(reloaded.count(), 4);
        assert_eq!(reloaded.list()[1].category.as_str(), "");
        assert_eq!(reloaded.list()[1].amount.cents(), 500);
        assert_eq!(reloaded.list()[3].category.as_str(), "Tea");
    }

    #[test]
    fn test_delete_is_one_based() {
        let (temp_dir, mut service) = create_test_service();
        seed(&mut service);

        assert!(matches!(
            service.delete(0),
            Err(ExpenseError::IndexOutOfRange { index: 0, len: 3 })
        ));
        assert!(matches!(
            service.delete(4),
            Err(ExpenseError::IndexOutOfRange { index: 4, len: 3 })
        ));
        assert_eq!(service.count(), 3);

        let removed = service.delete(1).unwrap();
        assert_eq!(removed.category.as_str(), "Food");
        assert_eq!(service.count(), 2);
        assert_eq!(service.list()[0].category.as_str(), "Bus");

        assert_eq!(reload(&temp_dir).count(), 2);
    }

    #[test]
    fn test_delete_then_add_shifts_positions() {
        let (_temp_dir, mut service) = create_test_service();
        seed(&mut service);

        let removed = service.delete(1).unwrap();
        let readded = service
            .add(
                &removed.amount.as_decimal().to_string(),
                removed.category.as_str(),
                Some(&removed.date.to_string()),
            )
            .unwrap();

        assert!(readded.same_entry(&removed));
        assert_eq!(service.position_of(readded.id), Some(3));
        assert_eq!(service.list()[0].category.as_str(), "Bus");
    }

    #[test]
    fn test_ids_survive_index_shift() {
        let (_temp_dir, mut service) = create_test_service();
        seed(&mut service);
        let rent_id = service.get(3).unwrap().id;

        service.delete(1).unwrap();

        assert_eq!(service.position_of(rent_id), Some(2));
        assert_eq!(service.get(2).unwrap().id, rent_id);
    }

    #[test]
    fn test_edit_updates_provided_fields() {
        let (temp_dir, mut service) = create_test_service();
        seed(&mut service);

        let edited = service
            .edit(2, ExpenseEdit::new().amount("25.75").category("TRAIN"))
            .unwrap();
        assert_eq!(edited.amount.cents(), 2575);
        assert_eq!(edited.category.as_str(), "Train");
        assert_eq!(edited.date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());

        let reloaded = reload(&temp_dir);
        assert!(reloaded.list()[1].same_entry(&edited));
    }

    #[test]
    fn test_edit_with_blank_fields_is_identity() {
        let (temp_dir, mut service) = create_test_service();
        seed(&mut service);
        let data_file = temp_dir.path().join("expenses.json");
        let before_bytes = fs::read(&data_file).unwrap();
        let before = service.get(2).unwrap().clone();

        let after = service
            .edit(2, ExpenseEdit::new().amount("").category("  ").date(""))
            .unwrap();
        assert!(after.same_entry(&before));
        assert_eq!(after.id, before.id);

        let untouched = service.edit(2, ExpenseEdit::new()).unwrap();
        assert!(untouched.same_entry(&before));

        assert_eq!(fs::read(&data_file).unwrap(), before_bytes);
    }

    #[test]
    fn test_edit_validates_everything_first() {
        let (temp_dir, mut service) = create_test_service();
        seed(&mut service);
        let before = service.get(1).unwrap().clone();

        let result = service.edit(1, ExpenseEdit::new().category("books").date("yesterday"));
        assert!(matches!(result, Err(ExpenseError::InvalidDate(_))));

        let result = service.edit(1, ExpenseEdit::new().amount("ten").category("books"));
        assert!(matches!(result, Err(ExpenseError::InvalidAmount(_))));

        assert!(service.get(1).unwrap().same_entry(&before));
        assert!(reload(&temp_dir).list()[0].same_entry(&before));
    }

    #[test]
    fn test_edit_index_checked() {
        let (_temp_dir, mut service) = create_test_service();
        seed(&mut service);

        assert!(matches!(
            service.edit(0, ExpenseEdit::new().amount("1")),
            Err(ExpenseError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            service.edit(9, ExpenseEdit::new()),
            Err(ExpenseError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_mutations_are_audited() {
        let (temp_dir, mut service) = create_test_service();
        seed(&mut service);
        service.edit(1, ExpenseEdit::new().amount("11")).unwrap();
        service.delete(2).unwrap();

        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let entries = logger.read_all().unwrap();
        let ops: Vec<_> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(
            ops,
            vec![
                Operation::Create,
                Operation::Create,
                Operation::Create,
                Operation::Update,
                Operation::Delete
            ]
        );
        assert_eq!(
            entries[3].diff_summary.as_deref(),
            Some("amount: $10.00 -> $11.00")
        );
    }

    #[test]
    fn test_audit_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            audit_enabled: false,
            ..Settings::default()
        };
        let (mut service, _) = ExpenseService::open(&paths, &settings).unwrap();

        service.add("1", "food", None).unwrap();
        assert!(!paths.audit_log().exists());
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the data file should be makes every save fail
        let data_path = temp_dir.path().join("expenses.json");
        fs::create_dir(&data_path).unwrap();
        fs::create_dir(temp_dir.path().join("expenses.json.tmp")).unwrap();

        let mut service = ExpenseService::new(ExpenseRepository::new(data_path), None);
        assert!(matches!(
            service.add("1", "food", None),
            Err(ExpenseError::Storage(_))
        ));
        assert_eq!(service.count(), 0);
    }
}
