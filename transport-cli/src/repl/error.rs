//! REPL error types.

use rustyline::error::ReadlineError;

use crate::api::ApiError;

/// Errors that abort a single command.
///
/// None of these end the session except an [`Input`](Self::Input) failure
/// while reading the next command line.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Network, parse or payload-shape failure from the API
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Input did not name a known command
    #[error("unknown command: {0} (type \"help\" for available commands)")]
    UnknownCommand(String),

    /// Line editor failure
    #[error("input error: {0}")]
    Input(#[from] ReadlineError),

    /// Input ended while a command was prompting
    #[error("{0} cancelled")]
    Cancelled(&'static str),

    /// Writing to the terminal failed
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CommandError::UnknownCommand("stopfind".into());
        assert_eq!(
            err.to_string(),
            "unknown command: stopfind (type \"help\" for available commands)"
        );

        let err = CommandError::Cancelled("trip");
        assert_eq!(err.to_string(), "trip cancelled");

        let err = CommandError::from(ApiError::MissingField("journeys".into()));
        assert_eq!(err.to_string(), "missing field in response: journeys");
    }
}
