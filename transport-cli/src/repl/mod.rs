//! Interactive command loop.
//!
//! The loop has a single state: read a line, run the command it names to
//! completion, repeat. Only `quit`, `exit` or the end of input leave it.
//! Command failures are printed and logged, then the next prompt is shown.

mod command;
mod dispatch;
mod error;
mod input;

use std::io::Write;

use tracing::error;

pub use command::{COMMANDS, Command, command_names_with_prefix};
pub use dispatch::{Dispatcher, Flow};
pub use error::CommandError;
pub use input::{Completion, LineSource, ScriptedInput, TerminalInput};

/// Main prompt.
pub const PROMPT: &str = ">> ";

/// Banner printed when the session starts.
pub const INTRO: &str = "Welcome to transportCLI. Type \"help\" for available commands.";

/// A REPL session over some input and output.
pub struct Repl<I, W> {
    dispatcher: Dispatcher,
    input: I,
    out: W,
}

impl<I: LineSource, W: Write> Repl<I, W> {
    pub fn new(dispatcher: Dispatcher, input: I, out: W) -> Self {
        Self {
            dispatcher,
            input,
            out,
        }
    }

    /// Run until the user quits or input ends.
    ///
    /// # Errors
    ///
    /// Only failures to read the next command line or to write to the
    /// output end the session with an error.
    pub async fn run(&mut self) -> Result<(), CommandError> {
        writeln!(self.out, "{INTRO}")?;

        while let Some(line) = self.input.read_line(PROMPT, Completion::Commands)? {
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(self.out, "{e}")?;
                    continue;
                }
            };

            match self
                .dispatcher
                .dispatch(&command, &mut self.input, &mut self.out)
                .await
            {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => {
                    error!(command = command.name(), error = %e, "command failed");
                    writeln!(self.out, "Error: {e}")?;
                }
            }
        }

        self.out.flush()?;
        Ok(())
    }

    /// Consume the session, returning its input and output.
    pub fn into_parts(self) -> (I, W) {
        (self.input, self.out)
    }
}
