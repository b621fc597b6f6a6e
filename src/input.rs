//! Reading input lines, from a `rustyline` editor on a terminal or from the
//! console input otherwise.

use crate::config::HistorySettings;
use crate::error::InputError;
use crate::io_adapters::Console;
use anyhow::Result;
use log::{debug, warn};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

/// Size of the input line buffer, terminator included. A line keeps at most
/// `MAX_INPUT_BYTES - 1` bytes; the rest is dropped.
pub const MAX_INPUT_BYTES: usize = 256;

pub enum LineEditor {
    Interactive {
        editor: DefaultEditor,
        history: HistorySettings,
    },
    Plain,
}

impl LineEditor {
    /// Use the line editor when stdin is a terminal, plain reads otherwise.
    pub fn for_stdin(history: &HistorySettings) -> Result<Self> {
        if io::stdin().is_terminal() {
            Self::interactive(history)
        } else {
            debug!("stdin is not a terminal, reading plain lines");
            Ok(LineEditor::Plain)
        }
    }

    pub fn interactive(history: &HistorySettings) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;
        if let Some(path) = history_file(history) {
            if path.exists() {
                if let Err(e) = editor.load_history(&path) {
                    warn!("cannot load history from {}: {e}", path.display());
                }
            }
        }
        Ok(LineEditor::Interactive {
            editor,
            history: history.clone(),
        })
    }

    /// Show `prompt` and read one line without its terminator, truncated to
    /// fit `max_bytes`.
    ///
    /// Ctrl-C on the terminal drops the current line and prompts again.
    pub fn read_line(
        &mut self,
        prompt: &str,
        console: &mut Console,
        max_bytes: usize,
    ) -> Result<String, InputError> {
        let mut line = match self {
            LineEditor::Interactive { editor, history } => loop {
                match editor.readline(prompt) {
                    Ok(line) => {
                        if history.enabled && !line.trim().is_empty() {
                            let _ = editor.add_history_entry(line.as_str());
                        }
                        break line;
                    }
                    Err(ReadlineError::Interrupted) => {
                        debug!("line interrupted");
                        continue;
                    }
                    Err(ReadlineError::Eof) => return Err(InputError::Eof),
                    Err(err) => return Err(InputError::Read(err.to_string())),
                }
            },
            LineEditor::Plain => read_plain_line(prompt, console)?,
        };
        truncate_line(&mut line, max_bytes);
        Ok(line)
    }

    /// Persist history if a history file is configured.
    pub fn save_history(&mut self) {
        if let LineEditor::Interactive { editor, history } = self {
            if let Some(path) = history_file(history) {
                if let Err(e) = editor.save_history(&path) {
                    warn!("cannot save history to {}: {e}", path.display());
                }
            }
        }
    }
}

fn history_file(history: &HistorySettings) -> Option<PathBuf> {
    history.file.clone().filter(|_| history.enabled)
}

fn read_plain_line(prompt: &str, console: &mut Console) -> Result<String, InputError> {
    write!(console.output, "{prompt}")?;
    console.output.flush()?;

    let mut line = String::new();
    if console.input.read_line(&mut line)? == 0 {
        return Err(InputError::Eof);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// Cut `line` so that it fits a buffer of `max_bytes` including the
/// terminator, without splitting a character.
pub fn truncate_line(line: &mut String, max_bytes: usize) {
    let limit = max_bytes.saturating_sub(1);
    if line.len() <= limit {
        return;
    }
    let mut cut = limit;
    while !line.is_char_boundary(cut) {
        cut -= 1;
    }
    debug!("input line truncated from {} to {cut} bytes", line.len());
    line.truncate(cut);
}
