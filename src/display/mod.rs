//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses for terminal display.

pub mod expense;

pub use expense::{
    format_expense_details, format_expense_table, format_month_summary, format_summary,
    format_total, month_name,
};
