//! Expense model
//!
//! One recorded expenditure: an id, a positive amount, a description and the
//! date it was recorded on.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::money::Money;

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expense {
    /// Smallest free non-negative integer at creation time
    pub id: u32,

    pub amount: Money,

    pub description: String,

    /// Serialized as `YYYY-MM-DD`; never changes after creation
    pub date: NaiveDate,
}

impl Expense {
    /// Create a new expense dated today (local time)
    pub fn new(id: u32, amount: Money, description: impl Into<String>) -> Self {
        Self::new_on(id, amount, description, Local::now().date_naive())
    }

    /// Create a new expense on a specific date
    pub fn new_on(id: u32, amount: Money, description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            amount,
            description: description.into(),
            date,
        }
    }

    /// Calendar month (1-12) of the expense date
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Check the per-record invariants that hold for every stored expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount {
                id: self.id,
                amount: self.amount,
            });
        }
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription { id: self.id });
        }
        Ok(())
    }
}

/// Ways a persisted expense record can violate the model invariants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount { id: u32, amount: Money },
    EmptyDescription { id: u32 },
    DuplicateId(u32),
}

impl std::fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAmount { id, amount } => {
                write!(f, "expense {} has non-positive amount {}", id, amount)
            }
            Self::EmptyDescription { id } => write!(f, "expense {} has an empty description", id),
            Self::DuplicateId(id) => write!(f, "expense id {} appears more than once", id),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
