//! Line input with tab completion.

use std::collections::VecDeque;
use std::sync::Arc;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};

use crate::stations::StationIndex;

use super::command::command_names_with_prefix;
use super::error::CommandError;

/// What Tab completes at a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Command names at the main prompt
    Commands,
    /// Station names at the trip prompts
    Stations,
}

/// Source of user input lines.
///
/// `Ok(None)` means the user ended input: Ctrl-D anywhere, or Ctrl-C at a
/// station prompt.
pub trait LineSource {
    fn read_line(
        &mut self,
        prompt: &str,
        completion: Completion,
    ) -> Result<Option<String>, CommandError>;
}

/// Interactive terminal input backed by rustyline.
pub struct TerminalInput {
    editor: Editor<CompletionHelper, DefaultHistory>,
}

impl TerminalInput {
    pub fn new(stations: Arc<StationIndex>) -> Result<Self, CommandError> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(false)
            .build();

        let mut editor: Editor<CompletionHelper, DefaultHistory> = Editor::with_config(config)?;
        editor.set_helper(Some(CompletionHelper {
            stations,
            completion: Completion::Commands,
        }));

        Ok(Self { editor })
    }
}

impl LineSource for TerminalInput {
    fn read_line(
        &mut self,
        prompt: &str,
        completion: Completion,
    ) -> Result<Option<String>, CommandError> {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completion = completion;
        }

        match self.editor.readline(prompt) {
            Ok(line) => {
                if completion == Completion::Commands && !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => Ok(interrupted(completion)),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Ctrl-C clears the main prompt but cancels a station prompt.
fn interrupted(completion: Completion) -> Option<String> {
    match completion {
        Completion::Commands => Some(String::new()),
        Completion::Stations => None,
    }
}

/// Pre-recorded input, for tests and piped sessions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl LineSource for ScriptedInput {
    fn read_line(
        &mut self,
        prompt: &str,
        _completion: Completion,
    ) -> Result<Option<String>, CommandError> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

/// Rustyline helper completing either command or station names.
struct CompletionHelper {
    stations: Arc<StationIndex>,
    completion: Completion,
}

impl CompletionHelper {
    /// Candidates for the text before the cursor, replacing from column 0.
    fn candidates(&self, typed: &str) -> Vec<Pair> {
        let names: Vec<&str> = match self.completion {
            // only the command word completes
            Completion::Commands if typed.contains(char::is_whitespace) => Vec::new(),
            Completion::Commands => command_names_with_prefix(typed).collect(),
            Completion::Stations => self.stations.suggest(typed),
        };

        names
            .into_iter()
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect()
    }
}

impl Completer for CompletionHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok((0, self.candidates(&line[..pos])))
    }
}

impl Hinter for CompletionHelper {
    type Hint = String;
}

impl Highlighter for CompletionHelper {}

impl Validator for CompletionHelper {}

impl Helper for CompletionHelper {}
