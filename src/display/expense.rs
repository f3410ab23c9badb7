//! Expense display formatting
//!
//! Table and summary rendering shared by the command handlers and the
//! interactive menu.

use chrono::{Month, NaiveDate};
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Expense, Money};
use crate::services::Summary;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Date")]
    date: NaiveDate,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: Money,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            date: expense.date,
            description: expense.description.clone(),
            amount: expense.amount,
        }
    }
}

/// Format expenses as a table, or a notice when there are none
pub fn format_expense_table(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses to list.\n".to_string();
    }

    let rows: Vec<ExpenseRow> = expenses.iter().map(ExpenseRow::from).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .modify(Columns::single(3), Alignment::right());

    format!("{}\n", table)
}

/// Format a single expense for confirmation messages
pub fn format_expense_details(expense: &Expense) -> String {
    let mut output = String::new();

    output.push_str(&format!("ID:          {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!("Amount:      {}\n", expense.amount));

    output
}

/// English name of a month number, falling back to the number itself
pub fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| month.to_string())
}

/// Summary line for one calendar month
pub fn format_month_summary(month: u32, total: Money) -> String {
    format!(
        "Total expenses for {}: {}\n",
        month_name(month),
        total.format_with_symbol("$")
    )
}

/// Summary line for all expenses
pub fn format_total(total: Money) -> String {
    format!("Total expenses: {}\n", total.format_with_symbol("$"))
}

/// Text for a summary, whichever front end asked for it
pub fn format_summary(summary: &Summary) -> String {
    match *summary {
        Summary::Empty => "No expenses recorded.\n".to_string(),
        Summary::Month { month, total } => format_month_summary(month, total),
        Summary::Total(total) => format_total(total),
    }
}
