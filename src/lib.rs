//! Expense tracker - personal expense tracking from the command line
//!
//! This library provides the core functionality for the `expense` binary:
//! recording expenses in a local JSON file, listing them, summarizing by
//! month, and updating or deleting entries.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Backing file path resolution
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, money)
//! - `storage`: JSON file storage layer
//! - `services`: Input validation and business rules
//! - `display`: Table and summary formatting
//! - `cli`: One-shot command handlers
//! - `interactive`: Menu-driven session
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_tracker::models::Money;
//! use expense_tracker::services::ExpenseService;
//! use expense_tracker::storage::ExpenseStore;
//!
//! let mut store = ExpenseStore::open("expenses.json");
//! let mut service = ExpenseService::new(&mut store);
//! service.add(Money::from_cents(1250), "Lunch", None)?;
//! # Ok::<(), expense_tracker::ExpenseError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod interactive;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
