//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling input validation before anything is written.

pub mod expense;

pub use expense::{
    validate_amount, validate_description, validate_month, ExpenseService, Summary,
};
