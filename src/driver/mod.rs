//! Terminal driver contract consumed by the sequence engine.
//!
//! The engine never talks to tmux directly. Everything that changes
//! multiplexer state goes through [`TerminalDriver`], so tests can substitute a
//! recording implementation and dry runs can swap the transport.

pub mod process;
pub mod recording;
pub mod tmux;

use std::fmt;
use std::path::Path;

use async_trait::async_trait;

use crate::error::DriverError;

pub use tmux::TmuxDriver;

/// Address of a pane: `session:window.pane`, with absent parts omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneTarget {
    pub session: Option<String>,
    pub window: Option<String>,
    pub pane: Option<String>,
}

impl PaneTarget {
    /// True when no part is set and tmux should use its current pane.
    pub fn is_empty(&self) -> bool {
        self.session.is_none() && self.window.is_none() && self.pane.is_none()
    }

    /// Same session/window with a different pane.
    pub fn with_pane(&self, pane: impl Into<String>) -> Self {
        Self {
            pane: Some(pane.into()),
            ..self.clone()
        }
    }

    /// Session/window part only.
    pub fn window_only(&self) -> Self {
        Self {
            pane: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for PaneTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(session) = &self.session {
            write!(f, "{session}:")?;
        }
        if let Some(window) = &self.window {
            f.write_str(window)?;
            if self.pane.is_some() {
                f.write_str(".")?;
            }
        }
        if let Some(pane) = &self.pane {
            f.write_str(pane)?;
        }
        Ok(())
    }
}

/// Side-effecting multiplexer operations used by the engine.
#[async_trait]
pub trait TerminalDriver: Send {
    /// Attach to `name`, creating the session when it does not exist.
    async fn select_or_create_session(&mut self, name: &str) -> Result<(), DriverError>;

    /// Select window `name` in `session`, creating it when missing.
    async fn select_or_create_window(
        &mut self,
        session: Option<&str>,
        name: &str,
    ) -> Result<(), DriverError>;

    async fn select_pane(&mut self, target: &PaneTarget) -> Result<(), DriverError>;

    /// Split the window addressed by `target`; `options` are passed through
    /// to `split-window` verbatim.
    async fn split(&mut self, target: &PaneTarget, options: Option<&str>)
        -> Result<(), DriverError>;

    /// Type one command line into a pane and press Enter.
    async fn send_shell(&mut self, target: &PaneTarget, line: &str) -> Result<(), DriverError>;

    /// Capture the pane's visible contents. With `file`, append them there and
    /// return `None`; otherwise return the captured text.
    async fn capture_buffer(
        &mut self,
        target: &PaneTarget,
        file: Option<&Path>,
    ) -> Result<Option<String>, DriverError>;

    /// Start streaming the pane's live output into `sink`.
    async fn pipe_to_sink(&mut self, target: &PaneTarget, sink: &Path) -> Result<(), DriverError>;

    async fn stop_pipe(&mut self, target: &PaneTarget) -> Result<(), DriverError>;

    /// Mirror a variable into the multiplexer's own environment.
    async fn set_environment(&mut self, key: &str, value: &str) -> Result<(), DriverError>;

    async fn kill_window(&mut self, session: Option<&str>, name: &str)
        -> Result<(), DriverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_renders_present_parts() {
        let full = PaneTarget {
            session: Some("work".into()),
            window: Some("build".into()),
            pane: Some("2".into()),
        };
        assert_eq!(full.to_string(), "work:build.2");
        assert_eq!(full.window_only().to_string(), "work:build");

        let window_pane = PaneTarget {
            window: Some("build".into()),
            ..PaneTarget::default()
        }
        .with_pane("1");
        assert_eq!(window_pane.to_string(), "build.1");

        let session_only = PaneTarget {
            session: Some("work".into()),
            ..PaneTarget::default()
        };
        assert_eq!(session_only.to_string(), "work:");
        assert!(PaneTarget::default().is_empty());
        assert_eq!(PaneTarget::default().to_string(), "");
    }
}
