//! Interactive menu session
//!
//! A numbered menu that keeps asking for a choice until the user exits or
//! input runs out. Every action goes through `ExpenseService`, so the rules
//! match the one-shot commands; only the way input is collected differs.

use std::fmt;
use std::io::{BufRead, Write};

use crate::display::{format_expense_details, format_expense_table, format_summary};
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::ExpenseService;

use super::prompt::{
    parse_amount, parse_description, parse_id, parse_month, parse_optional_amount, Prompter,
};

/// Entries of the main menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    Summary,
    Delete,
    Update,
    Total,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::Add,
        MenuChoice::List,
        MenuChoice::Summary,
        MenuChoice::Delete,
        MenuChoice::Update,
        MenuChoice::Total,
        MenuChoice::Exit,
    ];

    /// Parse a menu number typed by the user
    pub fn parse(input: &str) -> ExpenseResult<Self> {
        input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| {
                ExpenseError::Validation(format!(
                    "Invalid choice '{}'. Enter a number from 1 to {}.",
                    input,
                    Self::ALL.len()
                ))
            })
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Add => "Add expense",
            Self::List => "List expenses",
            Self::Summary => "Monthly summary",
            Self::Delete => "Delete expense",
            Self::Update => "Update expense",
            Self::Total => "Total expenses",
            Self::Exit => "Exit",
        };
        write!(f, "{}", label)
    }
}

/// Whether the menu loop keeps going after an action
enum Flow {
    Continue,
    Quit,
}

/// The menu loop
pub struct InteractiveSession<'a, R, W> {
    service: ExpenseService<'a>,
    prompter: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> InteractiveSession<'a, R, W> {
    pub fn new(service: ExpenseService<'a>, prompter: Prompter<R, W>) -> Self {
        Self { service, prompter }
    }

    /// Give back the prompter (used by tests to inspect output)
    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// Run until the user picks Exit or input ends
    pub fn run(&mut self) -> ExpenseResult<()> {
        self.prompter.say("\nExpense Tracker\n===============\n")?;

        loop {
            self.prompter.say(&menu_text())?;
            let prompt = format!("Select an option [1-{}]: ", MenuChoice::ALL.len());
            let Some(choice) = self.prompter.prompt_until(&prompt, MenuChoice::parse)? else {
                break;
            };

            let flow = match choice {
                MenuChoice::Add => self.add()?,
                MenuChoice::List => self.list()?,
                MenuChoice::Summary => self.summary()?,
                MenuChoice::Delete => self.delete()?,
                MenuChoice::Update => self.update()?,
                MenuChoice::Total => self.total()?,
                MenuChoice::Exit => Flow::Quit,
            };

            if let Flow::Quit = flow {
                break;
            }
        }

        self.prompter.say("Goodbye!\n")
    }

    fn add(&mut self) -> ExpenseResult<Flow> {
        let Some(description) = self
            .prompter
            .prompt_until("Description: ", parse_description)?
        else {
            return Ok(Flow::Quit);
        };
        let Some(amount) = self.prompter.prompt_until("Amount: ", parse_amount)? else {
            return Ok(Flow::Quit);
        };

        match self.service.add(amount, &description, None) {
            Ok(expense) => self.prompter.say(&format!(
                "Expense added successfully (ID: {})\n",
                expense.id
            ))?,
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> ExpenseResult<Flow> {
        let table = format_expense_table(self.service.list());
        self.prompter.say(&table)?;
        Ok(Flow::Continue)
    }

    fn summary(&mut self) -> ExpenseResult<Flow> {
        let Some(month) = self.prompter.prompt_until("Month (1-12): ", parse_month)? else {
            return Ok(Flow::Quit);
        };

        self.show_summary(Some(month))
    }

    fn total(&mut self) -> ExpenseResult<Flow> {
        self.show_summary(None)
    }

    fn show_summary(&mut self, month: Option<u32>) -> ExpenseResult<Flow> {
        match self.service.summary(month) {
            Ok(summary) => self.prompter.say(&format_summary(&summary))?,
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> ExpenseResult<Flow> {
        let Some(id) = self.prompter.prompt_until("Expense ID: ", parse_id)? else {
            return Ok(Flow::Quit);
        };

        match self.service.delete(id) {
            Ok(expense) => self.prompter.say(&format!(
                "Expense deleted successfully (ID: {})\n",
                expense.id
            ))?,
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    fn update(&mut self) -> ExpenseResult<Flow> {
        let Some(id) = self.prompter.prompt_until("Expense ID: ", parse_id)? else {
            return Ok(Flow::Quit);
        };

        let current = match self.service.get(id) {
            Ok(expense) => format_expense_details(expense),
            Err(e) => {
                self.report(e)?;
                return Ok(Flow::Continue);
            }
        };
        self.prompter.say(&current)?;

        let Some(amount) = self
            .prompter
            .prompt_until("New amount (blank to keep): ", parse_optional_amount)?
        else {
            return Ok(Flow::Quit);
        };
        let Some(description) = self
            .prompter
            .prompt_string("New description (blank to keep): ")?
        else {
            return Ok(Flow::Quit);
        };
        let description = Some(description.as_str()).filter(|d| !d.is_empty());

        if amount.is_none() && description.is_none() {
            self.prompter.say("No changes made.\n")?;
            return Ok(Flow::Continue);
        }

        match self.service.update(id, amount, description) {
            Ok(expense) => self.prompter.say(&format!(
                "Expense updated successfully (ID: {})\n",
                expense.id
            ))?,
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: ExpenseError) -> ExpenseResult<()> {
        self.prompter.say(&format!("Error: {}\n", err))
    }
}

fn menu_text() -> String {
    let mut text = String::from("\n");
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        text.push_str(&format!("  {}. {}\n", i + 1, choice));
    }
    text
}
