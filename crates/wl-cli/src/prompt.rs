//! Interactive note prompt.

use std::io::{self, BufRead, Write};

use wl_engine::{LogError, NoteSource};

/// Asks for a note on `output` and reads one line from `input`.
pub struct PromptNotes<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptNotes<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptNotes<io::StdinLock<'static>, io::Stderr> {
    /// Prompts on stderr so stdout carries only command output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> NoteSource for PromptNotes<R, W> {
    fn note(&mut self) -> Result<String, LogError> {
        let mut line = String::new();
        let read = write!(self.output, "note? ")
            .and_then(|()| self.output.flush())
            .and_then(|()| self.input.read_line(&mut line));

        match read {
            Ok(_) if !line.trim().is_empty() => Ok(line.trim().to_string()),
            Ok(_) => Err(LogError::MissingNote),
            Err(e) => Err(LogError::NoteInput(e)),
        }
    }
}
