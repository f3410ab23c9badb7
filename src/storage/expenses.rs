//! Expense store backed by a single JSON file
//!
//! Holds the authoritative in-memory list of expenses and rewrites the whole
//! file after every mutation. A missing file is created empty; a broken or
//! unreadable file yields an empty store and is left on disk untouched until
//! the next successful mutation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde_json::Value;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseValidationError, Money};

use super::file_io::{read_json, write_json_atomic};

/// Owner of the expense collection and its persisted form
///
/// No locking is done: another process writing the same file between load
/// and save is overwritten (last writer wins).
#[derive(Debug)]
pub struct ExpenseStore {
    path: PathBuf,
    expenses: Vec<Expense>,
    load_warning: Option<ExpenseError>,
}

impl ExpenseStore {
    /// Open the store at `path`, loading whatever is there
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: path.into(),
            expenses: Vec::new(),
            load_warning: None,
        };
        store.load();
        store
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Problem encountered by the last `load`, if any
    pub fn load_warning(&self) -> Option<&ExpenseError> {
        self.load_warning.as_ref()
    }

    /// Reload the collection from disk
    ///
    /// Never fails: problems are recorded in `load_warning` and the store
    /// falls back to an empty collection.
    pub fn load(&mut self) -> &[Expense] {
        self.load_warning = None;

        self.expenses = match read_expenses(&self.path) {
            Ok(Some(expenses)) => {
                debug!("loaded {} expenses from {}", expenses.len(), self.path.display());
                expenses
            }
            Ok(None) => {
                info!("creating empty expense file at {}", self.path.display());
                if let Err(e) = write_json_atomic(&self.path, &[] as &[Expense]) {
                    self.record_warning(e);
                }
                Vec::new()
            }
            Err(e) => {
                self.record_warning(e);
                Vec::new()
            }
        };

        &self.expenses
    }

    fn record_warning(&mut self, err: ExpenseError) {
        warn!("{}; starting with no expenses", err);
        self.load_warning = Some(err);
    }

    /// Rewrite the backing file with the full collection
    pub fn save(&self) -> ExpenseResult<()> {
        debug!("saving {} expenses to {}", self.expenses.len(), self.path.display());
        write_json_atomic(&self.path, self.expenses.as_slice())
    }

    /// Write `next` to disk, then make it the in-memory collection
    ///
    /// On a failed write the collection is left as it was.
    fn commit(&mut self, next: Vec<Expense>) -> ExpenseResult<()> {
        let previous = std::mem::replace(&mut self.expenses, next);
        if let Err(e) = self.save() {
            self.expenses = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Smallest non-negative id not used by any stored expense
    pub fn next_id(&self) -> u32 {
        let mut ids: Vec<u32> = self.expenses.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();

        let mut next = 0;
        for id in ids {
            if id != next {
                break;
            }
            next += 1;
        }
        next
    }

    /// Record a new expense dated today and persist
    pub fn create(&mut self, amount: Money, description: &str) -> ExpenseResult<Expense> {
        let expense = Expense::new(self.next_id(), amount, description);
        self.push(expense)
    }

    /// Record a new expense on `date` and persist
    pub fn create_on(
        &mut self,
        amount: Money,
        description: &str,
        date: NaiveDate,
    ) -> ExpenseResult<Expense> {
        let expense = Expense::new_on(self.next_id(), amount, description, date);
        self.push(expense)
    }

    fn push(&mut self, expense: Expense) -> ExpenseResult<Expense> {
        let mut next = self.expenses.clone();
        next.push(expense.clone());
        self.commit(next)?;
        Ok(expense)
    }

    /// Remove every expense with `id`; returns whether anything was removed
    pub fn delete(&mut self, id: u32) -> ExpenseResult<bool> {
        if !self.contains(id) {
            return Ok(false);
        }

        let next = self
            .expenses
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(true)
    }

    /// Replace the provided fields of expense `id`
    ///
    /// Returns the updated record, or `None` if no expense has that id. The
    /// file is only rewritten when a field actually changed.
    pub fn update(
        &mut self,
        id: u32,
        amount: Option<Money>,
        description: Option<&str>,
    ) -> ExpenseResult<Option<Expense>> {
        let Some(index) = self.expenses.iter().position(|e| e.id == id) else {
            return Ok(None);
        };

        let mut updated = self.expenses[index].clone();
        if let Some(amount) = amount {
            updated.amount = amount;
        }
        if let Some(description) = description {
            updated.description = description.to_string();
        }

        if updated != self.expenses[index] {
            let mut next = self.expenses.clone();
            next[index] = updated.clone();
            self.commit(next)?;
        }
        Ok(Some(updated))
    }

    pub fn get(&self, id: u32) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    /// All expenses in insertion order
    pub fn list(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Sum of amounts for expenses in calendar month `month`, any year
    pub fn month_summary(&self, month: u32) -> ExpenseResult<Money> {
        let amounts = self
            .expenses
            .iter()
            .filter(|e| e.month() == month)
            .map(|e| e.amount);
        Money::checked_sum(amounts).ok_or(ExpenseError::Overflow)
    }

    /// Sum of all amounts
    pub fn total(&self) -> ExpenseResult<Money> {
        Money::checked_sum(self.expenses.iter().map(|e| e.amount)).ok_or(ExpenseError::Overflow)
    }
}

/// Read and validate the backing file; `Ok(None)` when it doesn't exist
fn read_expenses(path: &Path) -> ExpenseResult<Option<Vec<Expense>>> {
    let Some(raw) = read_json::<Value, _>(path)? else {
        return Ok(None);
    };

    let items = match raw {
        Value::Array(items) => items,
        other => {
            return Err(ExpenseError::Storage(format!(
                "{} does not contain a list of expenses (found {})",
                path.display(),
                json_kind(&other)
            )))
        }
    };

    let mut expenses = Vec::with_capacity(items.len());
    let mut seen = HashSet::new();

    for (index, item) in items.into_iter().enumerate() {
        let expense: Expense = serde_json::from_value(item).map_err(|e| {
            ExpenseError::Storage(format!(
                "{}: entry {} is not a valid expense: {}",
                path.display(),
                index,
                e
            ))
        })?;

        let checked = expense.validate().and_then(|_| {
            if seen.insert(expense.id) {
                Ok(())
            } else {
                Err(ExpenseValidationError::DuplicateId(expense.id))
            }
        });
        checked.map_err(|e| ExpenseError::Storage(format!("{}: {}", path.display(), e)))?;

        expenses.push(expense);
    }

    Ok(Some(expenses))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_store() -> (TempDir, ExpenseStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::open(temp_dir.path().join("expenses.json"));
        (temp_dir, store)
    }

    #[test]
    fn test_open_missing_file_creates_empty_list() {
        let (temp_dir, store) = create_test_store();
        let path = temp_dir.path().join("expenses.json");

        assert!(store.is_empty());
        assert!(store.load_warning().is_none());
        let on_disk: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(on_disk, serde_json::json!([]));
    }

    #[test]
    fn test_create_in_empty_store() {
        let (_temp_dir, mut store) = create_test_store();

        let expense = store.create(Money::from_cents(1250), "Lunch").unwrap();

        assert_eq!(expense.id, 0);
        assert_eq!(expense.amount, Money::from_cents(1250));
        assert_eq!(expense.date, Local::now().date_naive());
        assert_eq!(store.list(), &[expense]);
    }

    #[test]
    fn test_deleted_id_is_reused() {
        let (_temp_dir, mut store) = create_test_store();
        for name in ["a", "b", "c"] {
            store.create(Money::from_cents(100), name).unwrap();
        }

        assert!(store.delete(1).unwrap());
        let expense = store.create(Money::from_cents(100), "d").unwrap();
        assert_eq!(expense.id, 1);

        let expense = store.create(Money::from_cents(100), "e").unwrap();
        assert_eq!(expense.id, 3);
    }

    #[test]
    fn test_next_id_is_smallest_free_over_operation_sequence() {
        let (_temp_dir, mut store) = create_test_store();
        let ops: &[(bool, u32)] = &[
            (true, 0),
            (true, 0),
            (true, 0),
            (true, 0),
            (false, 0),
            (false, 2),
            (true, 0),
            (false, 3),
            (true, 0),
            (true, 0),
            (true, 0),
        ];

        for &(is_create, id) in ops {
            if is_create {
                let used: HashSet<u32> = store.list().iter().map(|e| e.id).collect();
                let expected = (0..).find(|i| !used.contains(i)).unwrap();
                let expense = store.create(Money::from_cents(1), "x").unwrap();
                assert_eq!(expense.id, expected);
            } else {
                store.delete(id).unwrap();
            }
        }
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let (temp_dir, mut store) = create_test_store();
        store.create_on(Money::from_cents(1000), "Books", date(2024, 3, 1)).unwrap();
        store.create_on(Money::from_cents(1), "Gum", date(2023, 12, 31)).unwrap();
        store.create_on(Money::from_cents(99999), "Rent", date(2024, 1, 1)).unwrap();
        store.delete(0).unwrap();
        store.create_on(Money::from_cents(450), "Coffee", date(2024, 2, 29)).unwrap();

        let reopened = ExpenseStore::open(temp_dir.path().join("expenses.json"));
        assert!(reopened.load_warning().is_none());
        assert_eq!(reopened.list(), store.list());
        assert_eq!(
            reopened.list().iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![1, 2, 0]
        );
    }

    #[test]
    fn test_update_replaces_only_given_fields() {
        let (_temp_dir, mut store) = create_test_store();
        let original = store.create(Money::from_cents(1250), "Lunch").unwrap();

        let updated = store
            .update(0, Some(Money::from_cents(9999)), None)
            .unwrap()
            .unwrap();
        assert_eq!(updated.amount, Money::from_cents(9999));
        assert_eq!(updated.description, "Lunch");
        assert_eq!(updated.date, original.date);

        let updated = store.update(0, None, Some("Dinner")).unwrap().unwrap();
        assert_eq!(updated.amount, Money::from_cents(9999));
        assert_eq!(updated.description, "Dinner");
    }

    #[test]
    fn test_update_without_changes_is_noop() {
        let (temp_dir, mut store) = create_test_store();
        store.create(Money::from_cents(1250), "Lunch").unwrap();
        let path = temp_dir.path().join("expenses.json");
        let before_disk = fs::read_to_string(&path).unwrap();
        let before = store.list().to_vec();

        let result = store.update(0, None, None).unwrap();

        assert_eq!(result.as_ref(), before.first());
        assert_eq!(store.list(), before.as_slice());
        assert_eq!(fs::read_to_string(&path).unwrap(), before_disk);
    }

    #[test]
    fn test_update_missing_id_returns_none() {
        let (_temp_dir, mut store) = create_test_store();
        store.create(Money::from_cents(100), "a").unwrap();

        assert!(store.update(5, Some(Money::from_cents(1)), None).unwrap().is_none());
        assert_eq!(store.get(0).unwrap().amount, Money::from_cents(100));
    }

    #[test]
    fn test_delete_missing_id_leaves_file_untouched() {
        let (temp_dir, mut store) = create_test_store();
        store.create(Money::from_cents(100), "a").unwrap();
        let path = temp_dir.path().join("expenses.json");
        let before = fs::read_to_string(&path).unwrap();

        assert!(!store.delete(42).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_month_summary() {
        let (_temp_dir, mut store) = create_test_store();
        store.create_on(Money::from_cents(1000), "A", date(2024, 1, 10)).unwrap();
        store.create_on(Money::from_cents(2000), "B", date(2024, 2, 5)).unwrap();
        store.create_on(Money::from_cents(550), "C", date(2023, 1, 20)).unwrap();

        assert_eq!(store.month_summary(1).unwrap(), Money::from_cents(1550));
        assert_eq!(store.month_summary(2).unwrap(), Money::from_cents(2000));
        assert_eq!(store.month_summary(3).unwrap(), Money::zero());
        assert_eq!(store.total().unwrap(), Money::from_cents(3550));
    }

    #[test]
    fn test_totals_report_overflow_instead_of_wrapping() {
        let (_temp_dir, mut store) = create_test_store();
        let huge = Money::from_cents(i64::MAX / 2 + 1);
        store.create_on(huge, "A", date(2024, 1, 1)).unwrap();
        store.create_on(huge, "B", date(2024, 1, 2)).unwrap();

        assert!(matches!(store.total(), Err(ExpenseError::Overflow)));
        assert!(matches!(store.month_summary(1), Err(ExpenseError::Overflow)));
        assert_eq!(store.month_summary(2).unwrap(), Money::zero());
    }

    #[test]
    fn test_largest_amounts_sum_and_round_trip() {
        let (temp_dir, mut store) = create_test_store();
        store.create(Money::MAX, "Yacht").unwrap();
        store.create(Money::MAX, "Another yacht").unwrap();
        store
            .create(Money::parse("123456789012.67").unwrap(), "House")
            .unwrap();

        let reopened = ExpenseStore::open(temp_dir.path().join("expenses.json"));
        assert!(reopened.load_warning().is_none());
        assert_eq!(reopened.list(), store.list());
        assert_eq!(
            reopened.total().unwrap().cents(),
            2 * Money::MAX.cents() + 12_345_678_901_267
        );
    }

    fn break_parent_dir(temp_dir: &TempDir) {
        // A plain file where the data directory used to be
        let dir = temp_dir.path().join("data");
        fs::remove_dir_all(&dir).unwrap();
        fs::write(&dir, "in the way").unwrap();
    }

    #[test]
    fn test_failed_save_leaves_memory_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = ExpenseStore::open(temp_dir.path().join("data").join("expenses.json"));
        store.create(Money::from_cents(100), "Kept").unwrap();
        let before = store.list().to_vec();
        break_parent_dir(&temp_dir);

        assert!(matches!(
            store.create(Money::from_cents(200), "Lost"),
            Err(ExpenseError::Storage(_))
        ));
        assert!(store.delete(0).is_err());
        assert!(store.update(0, Some(Money::from_cents(5)), Some("Changed")).is_err());

        assert_eq!(store.list(), before.as_slice());
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn test_load_non_list_yields_empty_store_and_keeps_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");

        for contents in [r#"{"id": 0}"#, "42", "\"text\"", "null"] {
            fs::write(&path, contents).unwrap();
            let store = ExpenseStore::open(&path);

            assert!(store.is_empty());
            assert!(matches!(store.load_warning(), Some(ExpenseError::Storage(_))));
            assert_eq!(fs::read_to_string(&path).unwrap(), contents);
        }
    }

    #[test]
    fn test_load_invalid_json_yields_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        fs::write(&path, "[{not json").unwrap();

        let store = ExpenseStore::open(&path);
        assert!(store.is_empty());
        assert!(store.load_warning().is_some());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[{not json");
    }

    #[test]
    fn test_load_rejects_bad_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let cases = [
            r#"[{"id": 0, "amount": 5.0, "date": "2024-01-01"}]"#,
            r#"[{"id": 0, "amount": -5.0, "description": "x", "date": "2024-01-01"}]"#,
            r#"[{"id": 0, "amount": 5.0, "description": "", "date": "2024-01-01"}]"#,
            r#"[{"id": 0, "amount": 5.0, "description": "x", "date": "yesterday"}]"#,
            r#"[{"id": -1, "amount": 5.0, "description": "x", "date": "2024-01-01"}]"#,
            r#"[{"id": 0, "amount": 5.0, "description": "x", "date": "2024-01-01"},
                {"id": 0, "amount": 6.0, "description": "y", "date": "2024-01-02"}]"#,
        ];

        for contents in cases {
            fs::write(&path, contents).unwrap();
            let store = ExpenseStore::open(&path);
            assert!(store.is_empty(), "accepted: {}", contents);
            assert!(store.load_warning().is_some());
        }
    }

    #[test]
    fn test_mutation_after_bad_load_overwrites_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        fs::write(&path, "garbage").unwrap();

        let mut store = ExpenseStore::open(&path);
        store.create(Money::from_cents(300), "Tea").unwrap();

        let reopened = ExpenseStore::open(&path);
        assert!(reopened.load_warning().is_none());
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.list()[0].id, 0);
    }

    #[test]
    fn test_load_accepts_integer_amounts() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        fs::write(
            &path,
            r#"[{"id": 4, "amount": 20, "description": "Taxi", "date": "2024-05-01"}]"#,
        )
        .unwrap();

        let store = ExpenseStore::open(&path);
        assert!(store.load_warning().is_none());
        assert_eq!(store.get(4).unwrap().amount, Money::from_cents(2000));
        assert_eq!(store.next_id(), 0);
    }
}
