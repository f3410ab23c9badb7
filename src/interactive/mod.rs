//! Interactive menu mode
//!
//! Entered when the program is started without a command.

pub mod prompt;
pub mod session;

pub use prompt::Prompter;
pub use session::{InteractiveSession, MenuChoice};
