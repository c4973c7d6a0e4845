//! Terminal cosmetics around the input capabilities

use std::io::{self, Write};

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

use crate::infrastructure::traits::TextInput;

/// Wraps a [`TextInput`] and erases the prompt line once input is collected,
/// so only committed results stay on screen.
pub struct ErasingTextInput<T> {
    inner: T,
}

impl<T: TextInput> ErasingTextInput<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    fn erase(&self, echoed_newline: bool) -> io::Result<()> {
        let mut stdout = io::stdout();
        if echoed_newline {
            stdout.queue(MoveUp(1))?;
        }
        stdout
            .queue(MoveToColumn(0))?
            .queue(Clear(ClearType::CurrentLine))?;
        stdout.flush()
    }
}

impl<T: TextInput> TextInput for ErasingTextInput<T> {
    fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        let line = self.inner.read_line(prompt)?;
        self.erase(line.is_some())?;
        Ok(line)
    }
}
