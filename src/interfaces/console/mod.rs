//! Line-oriented console programs.
//!
//! Every program talks to a [`Console`] rather than to stdin/stdout directly
//! so the loops can be driven from in-memory buffers in tests.

pub mod atm;
pub mod converter;
pub mod grades;
pub mod guess;

use crate::error::{KioskError, Result};
use std::fmt::Display;
use std::io::{BufRead, Write};

/// A prompt/response channel over any buffered reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one line.
    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Prints `message` without a newline and reads the reply, trimmed.
    ///
    /// Returns [`KioskError::EndOfInput`] once the input is exhausted.
    pub fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(KioskError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Treats running out of input as a normal way to leave a program.
pub(crate) fn until_end_of_input(result: Result<()>) -> Result<()> {
    match result {
        Err(KioskError::EndOfInput) => Ok(()),
        other => other,
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{scripted, transcript};
    use super::*;

    #[test]
    fn test_prompt_trims_reply() {
        let mut console = scripted("  42  \n");
        assert_eq!(console.prompt("Number: ").unwrap(), "42");
        assert_eq!(transcript(console), "Number: ");
    }

    #[test]
    fn test_prompt_end_of_input() {
        let mut console = scripted("");
        assert!(matches!(console.prompt("> "), Err(KioskError::EndOfInput)));
    }

    #[test]
    fn test_until_end_of_input() {
        assert!(until_end_of_input(Err(KioskError::EndOfInput)).is_ok());
        assert!(until_end_of_input(Err(KioskError::RoundOver)).is_err());
    }
}
