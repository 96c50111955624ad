//! Line input for PROMPT and step-mode confirmations.

use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;

use super::settings;

/// Source of single lines of user input.
pub trait LineInput {
    /// Show `prompt` and read one line, without its trailing newline.
    /// End of input yields an empty line.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Reads from the process's stdin, prompting on stderr.
#[derive(Debug, Clone, Copy)]
pub struct StdinInput {
    color: bool,
}

impl StdinInput {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl LineInput for StdinInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut stderr = io::stderr();
        if self.color {
            write!(stderr, "{}", prompt.with(settings::COLOR_PROMPT))?;
        } else {
            write!(stderr, "{prompt}")?;
        }
        stderr.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(trim_newline(line))
    }
}

fn trim_newline(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}

/// Step-mode confirmation text shown before a keyword runs.
pub fn step_prompt(keyword: &str, payload: &str) -> String {
    format!(
        "{}[{keyword}]: {payload} <<< ",
        settings::STEP_PROMPT_PREFIX
    )
}
