//! Shared test fixtures for engine and runner test modules.

use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use crate::ui::{LineInput, RenderSink};

/// Render sink that keeps `(kind, message)` pairs for assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    fn record(&self, kind: &str, message: &str) {
        self.entries
            .lock()
            .expect("recording sink lock")
            .push((kind.to_string(), message.to_string()));
    }

    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.lock().expect("recording sink lock").clone()
    }

    /// True when an entry of `kind` contains `needle`.
    pub fn saw(&self, kind: &str, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|(k, msg)| k == kind && msg.contains(needle))
    }
}

impl RenderSink for RecordingSink {
    fn banner(&self, title: &str, desc: &str) {
        self.record("banner", &format!("{title}|{desc}"));
    }

    fn activity(&self, text: &str) {
        self.record("activity", text);
    }

    fn decision(&self, text: &str) {
        self.record("decision", text);
    }

    fn redirect(&self, target: &str) {
        self.record("redirect", target);
    }

    fn echo(&self, message: &str) {
        self.record("echo", message);
    }

    fn output_block(&self, text: &str) {
        self.record("output", text);
    }

    fn plain(&self, text: &str) {
        self.record("plain", text);
    }

    fn warn(&self, msg: &str) {
        self.record("warn", msg);
    }

    fn error(&self, msg: &str) {
        self.record("error", msg);
    }
}

/// Line input answering from a queue; empty once exhausted.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<const N: usize>(answers: [&str; N]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl LineInput for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_drains_then_returns_empty() {
        let mut input = ScriptedInput::new(["yes"]);
        assert_eq!(input.read_line("a? ").unwrap(), "yes");
        assert_eq!(input.read_line("b? ").unwrap(), "");
        assert_eq!(input.prompts(), ["a? ", "b? "]);
    }
}
