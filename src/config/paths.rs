//! Path management for the expense tracker
//!
//! ## Path Resolution Order
//!
//! 1. The `--file` command-line option, or the `EXPENSE_TRACKER_FILE`
//!    environment variable when the option is absent (clap reads both)
//! 2. `expenses.json` in the current working directory

use std::path::{Path, PathBuf};

use crate::error::ExpenseError;

/// Environment variable clap reads for `--file`
pub const DATA_FILE_ENV: &str = "EXPENSE_TRACKER_FILE";

/// File name used when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "expenses.json";

/// Resolved location of the expense data
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    data_file: PathBuf,
}

impl ExpensePaths {
    /// Resolve the backing file path from the value of `--file`
    ///
    /// An empty path counts as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a relative default is needed and the current
    /// directory cannot be determined.
    pub fn new(explicit: Option<PathBuf>) -> Result<Self, ExpenseError> {
        let data_file = match explicit.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => path,
            None => resolve_default_path()?,
        };

        Ok(Self { data_file })
    }

    /// Get the path of the JSON file holding the expenses
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    let cwd = std::env::current_dir().map_err(|e| {
        ExpenseError::Config(format!("Could not determine current directory: {}", e))
    })?;
    Ok(cwd.join(DEFAULT_DATA_FILE))
}
