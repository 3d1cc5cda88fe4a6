//! Command line parsing.

use super::error::CommandError;

/// Commands accepted at the `>> ` prompt, with their help text.
///
/// Sorted by name; completion lists them in this order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("alert", "List current service alerts: alert [bus|train]"),
    ("exit", "Exit the CLI"),
    ("help", "List available commands"),
    ("quit", "Exit the CLI"),
    ("stopfinder", "Look up Circular Quay in the stop finder"),
    ("test", "Print a greeting"),
    ("trip", "Plan a trip departing now between two stations"),
];

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StopFinder,
    /// Mode argument as typed, possibly empty.
    Alert(String),
    Trip,
    Test,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line.
    ///
    /// Returns `Ok(None)` for a blank line. The command name is matched
    /// exactly and case-sensitively; arguments are ignored by commands that
    /// take none.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, arg) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim()));

        let command = match name {
            "stopfinder" => Command::StopFinder,
            "alert" => Command::Alert(arg.to_string()),
            "trip" => Command::Trip,
            "test" => Command::Test,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::StopFinder => "stopfinder",
            Command::Alert(_) => "alert",
            Command::Trip => "trip",
            Command::Test => "test",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

/// Command names starting with `prefix`, for completion only.
pub fn command_names_with_prefix(prefix: &str) -> impl Iterator<Item = &'static str> + '_ {
    COMMANDS
        .iter()
        .map(|(name, _)| *name)
        .filter(move |name| name.starts_with(prefix))
}
