//! Storage layer for the expense tracker
//!
//! A single JSON file holding the list of expenses, rewritten in full after
//! every change.

pub mod expenses;
pub mod file_io;

pub use expenses::ExpenseStore;
