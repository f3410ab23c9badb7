//! Configuration module for the expense tracker
//!
//! Resolves where the expense data lives.

pub mod paths;

pub use paths::ExpensePaths;
