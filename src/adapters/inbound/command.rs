//! Console Commands
//!
//! Line grammar for the terminal front-end. Each line maps to exactly one
//! user gesture of the console.

use crate::application::{FormError, FormField};

pub const HELP: &str = "\
commands:
  refresh                      reload routes and metrics
  filter group <text>          filter by group (empty clears)
  filter keyword <text>        filter by path keyword (empty clears)
  filter clear                 clear both filters
  set <field> <value>          edit the create form (path, methods, target,
                               stripPrefix, rewrite, group, authType, apiKey,
                               rateLimitQps, timeoutMs, enabled)
  create                       submit the create form
  toggle-method <id>           flip a route between GET and POST
  toggle-enabled <id>          enable or disable a route
  delete <id>                  delete a route
  test <id>                    prefill the test panel from a route
  test-path <path>             edit the probe path
  test-key <key>               edit the probe credential
  send                         fire the probe
  show                         render the console
  help                         this text
  quit                         exit";

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Form(#[from] FormError),
}

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    FilterGroup(String),
    FilterKeyword(String),
    FilterClear,
    Set { field: FormField, value: String },
    Create,
    ToggleMethod(String),
    ToggleEnabled(String),
    Delete(String),
    Test(String),
    TestPath(String),
    TestKey(String),
    Send,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines parse to `Show`.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (verb, rest) = split_word(line);

        match verb {
            "" | "show" => Ok(Self::Show),
            "refresh" | "r" => Ok(Self::Refresh),
            "filter" => {
                let (kind, text) = split_word(rest);
                match kind {
                    "group" => Ok(Self::FilterGroup(text.to_string())),
                    "keyword" | "path" => Ok(Self::FilterKeyword(text.to_string())),
                    "clear" => Ok(Self::FilterClear),
                    _ => Err(CommandError::Usage("filter group|keyword <text> | filter clear")),
                }
            }
            "set" => {
                let (name, value) = split_word(rest);
                if name.is_empty() {
                    return Err(CommandError::Usage("set <field> <value>"));
                }
                Ok(Self::Set {
                    field: FormField::parse(name)?,
                    value: value.to_string(),
                })
            }
            "create" => Ok(Self::Create),
            "toggle-method" => required(rest, "toggle-method <id>").map(Self::ToggleMethod),
            "toggle-enabled" => required(rest, "toggle-enabled <id>").map(Self::ToggleEnabled),
            "delete" | "rm" => required(rest, "delete <id>").map(Self::Delete),
            "test" => required(rest, "test <id>").map(Self::Test),
            "test-path" => required(rest, "test-path <path>").map(Self::TestPath),
            "test-key" => Ok(Self::TestKey(rest.to_string())),
            "send" => Ok(Self::Send),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(idx) => (&input[..idx], input[idx..].trim()),
        None => (input, ""),
    }
}

fn required(arg: &str, usage: &'static str) -> Result<String, CommandError> {
    if arg.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(arg.to_string())
    }
}
