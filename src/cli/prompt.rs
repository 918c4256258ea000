//! Line-oriented console input for the interactive menu
//!
//! Generic over the reader and writer so sessions can be driven from memory in
//! tests. Every read returns `None` once input is exhausted.

use std::fmt;
use std::io::{BufRead, ErrorKind, Write};

/// Why a line was rejected by the bounded integer prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputProblem {
    /// Nothing was typed
    Empty,
    /// Something other than digits was typed
    NotANumber,
    /// Digits, but outside the accepted range
    OutOfRange,
}

impl fmt::Display for InputProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "No input."),
            Self::NotANumber => write!(f, "Invalid input."),
            Self::OutOfRange => write!(f, "Number out of range."),
        }
    }
}

/// Parse a line as an integer in `min..=max`
///
/// Only ASCII digits are accepted: no sign, no surrounding spaces.
///
/// # Errors
/// The [`InputProblem`] describing why the line was rejected
pub fn parse_bounded(line: &str, min: i32, max: i32) -> Result<i32, InputProblem> {
    if line.is_empty() {
        return Err(InputProblem::Empty);
    }
    if !line.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputProblem::NotANumber);
    }
    line.parse::<i32>()
        .ok()
        .filter(|v| (min..=max).contains(v))
        .ok_or(InputProblem::OutOfRange)
}

/// Interactive console over any reader/writer pair
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wrap a reader and writer
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write text as-is; console write failures are ignored
    pub fn print(&mut self, text: &str) {
        let _ = self.output.write_all(text.as_bytes());
    }

    /// Write text followed by a newline
    pub fn println(&mut self, text: &str) {
        self.print(text);
        self.print("\n");
    }

    /// Read one line without its line ending
    ///
    /// A line that is not valid UTF-8 is discarded and the user asked again.
    pub fn read_line(&mut self) -> Option<String> {
        loop {
            let _ = self.output.flush();
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => return Some(line.trim_end_matches(['\r', '\n']).to_string()),
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    self.print("Input is not valid text. Please try again: ");
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(_) => return None,
            }
        }
    }

    /// Read the first whitespace-delimited word of a line (empty when blank)
    pub fn read_word(&mut self) -> Option<String> {
        self.read_line().map(|line| {
            line.split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string()
        })
    }

    /// Read an integer in `min..=max`, re-prompting until one is entered
    pub fn read_int_in_range(&mut self, min: i32, max: i32) -> Option<i32> {
        loop {
            let line = self.read_line()?;
            match parse_bounded(&line, min, max) {
                Ok(value) => return Some(value),
                Err(problem) => self.print(&format!(
                    "{problem} Please enter a number between {min} and {max}: "
                )),
            }
        }
    }

    /// Ask a yes/no question answered with 1 or 0
    pub fn confirm(&mut self, question: &str) -> Option<bool> {
        self.print(&format!("{question} (1 for Yes, 0 for No): "));
        self.read_int_in_range(0, 1).map(|answer| answer == 1)
    }

    /// Block until the user presses Enter
    pub fn wait_for_enter(&mut self) -> Option<()> {
        self.print("\nPress Enter to continue...");
        self.read_line().map(|_| ())
    }

    /// Give back the writer, e.g. to inspect captured output
    pub fn into_output(self) -> W {
        self.output
    }
}
