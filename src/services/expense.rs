//! Expense service
//!
//! Business rules on top of the expense store. The command-line handlers and
//! the interactive menu both go through here, so input is checked the same
//! way regardless of how it was collected.

use chrono::NaiveDate;
use log::debug;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money};
use crate::storage::ExpenseStore;

/// Reject amounts that are zero, negative or above `Money::MAX`
pub fn validate_amount(amount: Money) -> ExpenseResult<Money> {
    if !amount.is_positive() {
        Err(ExpenseError::Validation(
            "Amount must be greater than zero.".into(),
        ))
    } else if amount > Money::MAX {
        Err(ExpenseError::Validation(format!(
            "Amount cannot exceed {}.",
            Money::MAX.format_with_symbol("$")
        )))
    } else {
        Ok(amount)
    }
}

/// Reject months outside 1-12
pub fn validate_month(month: u32) -> ExpenseResult<u32> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(ExpenseError::Validation(
            "Month must be between 1 and 12.".into(),
        ))
    }
}

/// Trim a description and reject it if nothing is left
pub fn validate_description(description: &str) -> ExpenseResult<&str> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        Err(ExpenseError::Validation(
            "Description cannot be empty.".into(),
        ))
    } else {
        Ok(trimmed)
    }
}

/// Outcome of a summary request, shared by both front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summary {
    /// Nothing has been recorded yet
    Empty,
    /// Total for one calendar month across all years
    Month { month: u32, total: Money },
    /// Total of every expense
    Total(Money),
}

/// Service for expense management
pub struct ExpenseService<'a> {
    store: &'a mut ExpenseStore,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(store: &'a mut ExpenseStore) -> Self {
        Self { store }
    }

    /// Record a new expense, dated today unless `date` is given
    pub fn add(
        &mut self,
        amount: Money,
        description: &str,
        date: Option<NaiveDate>,
    ) -> ExpenseResult<Expense> {
        let amount = validate_amount(amount)?;
        let description = validate_description(description)?;

        let expense = match date {
            Some(date) => self.store.create_on(amount, description, date)?,
            None => self.store.create(amount, description)?,
        };
        debug!("added expense {}", expense.id);
        Ok(expense)
    }

    /// All expenses in insertion order
    pub fn list(&self) -> &[Expense] {
        self.store.list()
    }

    pub fn get(&self, id: u32) -> ExpenseResult<&Expense> {
        self.store.get(id).ok_or(ExpenseError::NotFound(id))
    }

    /// Total spent in calendar month `month` across all years
    pub fn month_summary(&self, month: u32) -> ExpenseResult<Money> {
        let month = validate_month(month)?;
        self.store.month_summary(month)
    }

    pub fn total(&self) -> ExpenseResult<Money> {
        self.store.total()
    }

    /// Summarize one month, or everything when `month` is `None`
    ///
    /// The month is checked first, so an out-of-range month is an error even
    /// when nothing has been recorded.
    pub fn summary(&self, month: Option<u32>) -> ExpenseResult<Summary> {
        let month = month.map(validate_month).transpose()?;
        if self.store.is_empty() {
            return Ok(Summary::Empty);
        }

        match month {
            Some(month) => Ok(Summary::Month {
                month,
                total: self.store.month_summary(month)?,
            }),
            None => Ok(Summary::Total(self.store.total()?)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Delete an expense, failing if it doesn't exist
    pub fn delete(&mut self, id: u32) -> ExpenseResult<Expense> {
        let expense = self.get(id)?.clone();
        self.store.delete(id)?;
        debug!("deleted expense {}", id);
        Ok(expense)
    }

    /// Change the amount and/or description of an existing expense
    ///
    /// With neither field given the record is returned unchanged.
    pub fn update(
        &mut self,
        id: u32,
        amount: Option<Money>,
        description: Option<&str>,
    ) -> ExpenseResult<Expense> {
        if !self.store.contains(id) {
            return Err(ExpenseError::NotFound(id));
        }
        let amount = amount.map(validate_amount).transpose()?;
        let description = description.map(validate_description).transpose()?;

        self.store
            .update(id, amount, description)?
            .ok_or(ExpenseError::NotFound(id))
    }
}
