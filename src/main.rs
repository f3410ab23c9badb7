use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::debug;

use expense_tracker::cli::{handle_expense_command, ExpenseCommands};
use expense_tracker::config::paths::DATA_FILE_ENV;
use expense_tracker::config::ExpensePaths;
use expense_tracker::interactive::{InteractiveSession, Prompter};
use expense_tracker::services::ExpenseService;
use expense_tracker::storage::ExpenseStore;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense tracker",
    long_about = "Records expenses (amount, description, date) in a local JSON file \
                  and lists, summarizes, updates or deletes them. Run without a \
                  command to use the interactive menu."
)]
struct Cli {
    /// Path to the expenses file [default: ./expenses.json]
    #[arg(long, global = true, value_name = "PATH", env = DATA_FILE_ENV)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<ExpenseCommands>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let paths = ExpensePaths::new(cli.file)?;
    debug!("using expenses file {}", paths.data_file().display());

    let mut store = ExpenseStore::open(paths.data_file());
    if let Some(warning) = store.load_warning() {
        eprintln!("Warning: {}. Starting with no expenses.", warning);
    }

    match cli.command {
        Some(cmd) => handle_expense_command(&mut store, cmd)?,
        None => {
            let mut session =
                InteractiveSession::new(ExpenseService::new(&mut store), Prompter::stdio());
            session.run()?;
        }
    }

    Ok(())
}
