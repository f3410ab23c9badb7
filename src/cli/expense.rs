//! Expense CLI commands
//!
//! Implements the one-shot commands: add, list, summary, delete and update.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::display::{format_expense_table, format_summary};
use crate::error::ExpenseResult;
use crate::models::Money;
use crate::services::ExpenseService;
use crate::storage::ExpenseStore;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// Description of the expense
        #[arg(long)]
        description: String,
        /// Amount of the expense (e.g., "12.50")
        #[arg(long, allow_hyphen_values = true)]
        amount: Money,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List all expenses
    List,

    /// Show the total for a month, or for all expenses
    Summary {
        /// Month number (1-12)
        #[arg(long, allow_hyphen_values = true)]
        month: Option<u32>,
    },

    /// Delete an expense
    Delete {
        /// ID of the expense to delete
        #[arg(long)]
        id: u32,
    },

    /// Update the amount and/or description of an expense
    Update {
        /// ID of the expense to update
        #[arg(long)]
        id: u32,
        /// New amount
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<Money>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(store: &mut ExpenseStore, cmd: ExpenseCommands) -> ExpenseResult<()> {
    let mut service = ExpenseService::new(store);

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            date,
        } => {
            let expense = service.add(amount, &description, date)?;
            println!("Expense added successfully (ID: {})", expense.id);
        }

        ExpenseCommands::List => {
            print!("{}", format_expense_table(service.list()));
        }

        ExpenseCommands::Summary { month } => {
            print!("{}", format_summary(&service.summary(month)?));
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.delete(id)?;
            println!("Expense deleted successfully (ID: {})", expense.id);
        }

        ExpenseCommands::Update {
            id,
            amount,
            description,
        } => {
            if amount.is_none() && description.is_none() {
                // Still surface an unknown id
                service.get(id)?;
                println!("No changes specified. Use --amount or --description.");
                return Ok(());
            }

            let expense = service.update(id, amount, description.as_deref())?;
            println!(
                "Expense updated successfully (ID: {}, amount: {}, description: {})",
                expense.id, expense.amount, expense.description
            );
        }
    }

    Ok(())
}
