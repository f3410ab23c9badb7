//! Line-based prompting
//!
//! Reads one line per prompt and re-asks until the answer parses. End of
//! input is reported as `None` so callers can wind down cleanly.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Money;
use crate::services::{validate_amount, validate_description, validate_month};

/// Prompt helper over any line reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// Prompter bound to the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the underlying writer
    pub fn into_output(self) -> W {
        self.output
    }

    /// Write text as-is
    pub fn say(&mut self, text: &str) -> ExpenseResult<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Ask once; `None` at end of input
    pub fn prompt_string(&mut self, prompt: &str) -> ExpenseResult<Option<String>> {
        self.say(prompt)?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| ExpenseError::Io(e.to_string()))?;
        if read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    /// Ask until `parse` accepts the answer, printing each rejection
    pub fn prompt_until<T, F>(&mut self, prompt: &str, parse: F) -> ExpenseResult<Option<T>>
    where
        F: Fn(&str) -> ExpenseResult<T>,
    {
        loop {
            let Some(answer) = self.prompt_string(prompt)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => self.say(&format!("Error: {}\n", e))?,
            }
        }
    }
}

/// Parse a positive amount
pub fn parse_amount(input: &str) -> ExpenseResult<Money> {
    let amount =
        Money::parse(input).map_err(|e| ExpenseError::Validation(format!("{}.", e)))?;
    validate_amount(amount)
}

/// Parse a positive amount, treating a blank answer as "keep current"
pub fn parse_optional_amount(input: &str) -> ExpenseResult<Option<Money>> {
    if input.is_empty() {
        Ok(None)
    } else {
        parse_amount(input).map(Some)
    }
}

/// Parse a non-empty description
pub fn parse_description(input: &str) -> ExpenseResult<String> {
    validate_description(input).map(str::to_string)
}

/// Parse a month number in 1-12
pub fn parse_month(input: &str) -> ExpenseResult<u32> {
    let month = input
        .parse::<u32>()
        .map_err(|_| ExpenseError::Validation("Month must be a number between 1 and 12.".into()))?;
    validate_month(month)
}

/// Parse an expense id
pub fn parse_id(input: &str) -> ExpenseResult<u32> {
    input
        .parse::<u32>()
        .map_err(|_| ExpenseError::Validation("ID must be a non-negative whole number.".into()))
}
