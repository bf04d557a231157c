// ABOUTME: Console seam — line input with interrupt/end-of-input detection, plus text output.
// ABOUTME: The terminal implementation uses rustyline; tests drive the controller with scripted input.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Result of asking the user for one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C at the prompt.
    Interrupted,
    /// Ctrl-D or closed stdin.
    Eof,
}

/// Everything the session controller needs from the terminal.
pub trait Console {
    /// Show `prompt` and read one line of input.
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<ReadOutcome>;

    /// Print a block of text followed by a newline.
    fn print(&mut self, text: &str);
}

/// Interactive terminal console with line editing and in-memory history.
pub struct TerminalConsole {
    editor: DefaultEditor,
}

impl TerminalConsole {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(e.into()),
        }
    }

    fn print(&mut self, text: &str) {
        println!("{}", text);
    }
}
