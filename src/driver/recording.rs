//! In-memory driver that records calls instead of touching a multiplexer.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::DriverError;

use super::{PaneTarget, TerminalDriver};

/// One recorded driver call. Targets are kept in their rendered form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    Session(String),
    Window(Option<String>, String),
    SelectPane(String),
    Split(String, Option<String>),
    Shell(String, String),
    Capture(String, Option<PathBuf>),
    Pipe(String),
    StopPipe(String),
    SetEnv(String, String),
    KillWindow(Option<String>, String),
}

/// Records every call. Pipe output and capture text can be scripted.
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    calls: Vec<DriverCall>,
    /// Written into the active sink when the pipe stops.
    pipe_output: Option<String>,
    capture_text: Option<String>,
    active_sink: Option<PathBuf>,
    /// Fail every `set_environment` call.
    fail_set_environment: bool,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pipe_output(mut self, text: impl Into<String>) -> Self {
        self.pipe_output = Some(text.into());
        self
    }

    pub fn with_capture_text(mut self, text: impl Into<String>) -> Self {
        self.capture_text = Some(text.into());
        self
    }

    pub fn failing_set_environment(mut self) -> Self {
        self.fail_set_environment = true;
        self
    }

    pub fn calls(&self) -> &[DriverCall] {
        &self.calls
    }

    /// Lines sent through `send_shell`, in order.
    pub fn shell_lines(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DriverCall::Shell(_, line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl TerminalDriver for RecordingDriver {
    async fn select_or_create_session(&mut self, name: &str) -> Result<(), DriverError> {
        self.calls.push(DriverCall::Session(name.to_string()));
        Ok(())
    }

    async fn select_or_create_window(
        &mut self,
        session: Option<&str>,
        name: &str,
    ) -> Result<(), DriverError> {
        self.calls.push(DriverCall::Window(
            session.map(str::to_string),
            name.to_string(),
        ));
        Ok(())
    }

    async fn select_pane(&mut self, target: &PaneTarget) -> Result<(), DriverError> {
        self.calls.push(DriverCall::SelectPane(target.to_string()));
        Ok(())
    }

    async fn split(
        &mut self,
        target: &PaneTarget,
        options: Option<&str>,
    ) -> Result<(), DriverError> {
        self.calls.push(DriverCall::Split(
            target.to_string(),
            options.map(str::to_string),
        ));
        Ok(())
    }

    async fn send_shell(&mut self, target: &PaneTarget, line: &str) -> Result<(), DriverError> {
        self.calls
            .push(DriverCall::Shell(target.to_string(), line.to_string()));
        Ok(())
    }

    async fn capture_buffer(
        &mut self,
        target: &PaneTarget,
        file: Option<&Path>,
    ) -> Result<Option<String>, DriverError> {
        self.calls.push(DriverCall::Capture(
            target.to_string(),
            file.map(Path::to_path_buf),
        ));
        match file {
            Some(_) => Ok(None),
            None => Ok(Some(self.capture_text.clone().unwrap_or_default())),
        }
    }

    async fn pipe_to_sink(&mut self, target: &PaneTarget, sink: &Path) -> Result<(), DriverError> {
        self.calls.push(DriverCall::Pipe(target.to_string()));
        self.active_sink = Some(sink.to_path_buf());
        Ok(())
    }

    async fn stop_pipe(&mut self, target: &PaneTarget) -> Result<(), DriverError> {
        self.calls.push(DriverCall::StopPipe(target.to_string()));
        if let (Some(sink), Some(text)) = (self.active_sink.take(), &self.pipe_output) {
            std::fs::write(sink, text)?;
        }
        Ok(())
    }

    async fn set_environment(&mut self, key: &str, value: &str) -> Result<(), DriverError> {
        self.calls
            .push(DriverCall::SetEnv(key.to_string(), value.to_string()));
        if self.fail_set_environment {
            return Err(DriverError::CommandFailed(format!(
                "set-environment {key}: no server running"
            )));
        }
        Ok(())
    }

    async fn kill_window(
        &mut self,
        session: Option<&str>,
        name: &str,
    ) -> Result<(), DriverError> {
        self.calls.push(DriverCall::KillWindow(
            session.map(str::to_string),
            name.to_string(),
        ));
        Ok(())
    }
}
