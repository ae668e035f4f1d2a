mod command;
mod terminal_console;
pub mod view;

pub use command::{Command, CommandError, HELP};
pub use terminal_console::{Step, TerminalConsole};
