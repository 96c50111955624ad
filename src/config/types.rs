//! Settings data model.

use std::time::Duration;

use serde::Deserialize;

use super::defaults::{DEFAULT_EXTRACT_SETTLE_SECS, DEFAULT_SCRIPT_FILE, DEFAULT_TMUX_BINARY};

/// Top-level tool settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub tmux: TmuxSettings,
    pub run: RunSettings,
    pub display: DisplaySettings,
}

impl Settings {
    /// EXTRACT settle delay as a duration. Values loading would reject fall
    /// back to the default.
    pub fn extract_settle(&self) -> Duration {
        Duration::try_from_secs_f64(self.run.extract_settle_secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_EXTRACT_SETTLE_SECS))
    }
}

/// `[tmux]` table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmuxSettings {
    /// tmux client executable.
    pub binary: String,
}

impl Default for TmuxSettings {
    fn default() -> Self {
        Self {
            binary: DEFAULT_TMUX_BINARY.into(),
        }
    }
}

/// `[run]` table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunSettings {
    /// Script file used when none is given on the command line.
    pub script: String,
    pub extract_settle_secs: f64,
    /// Session for sequences that do not name one.
    pub default_session: Option<String>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            script: DEFAULT_SCRIPT_FILE.into(),
            extract_settle_secs: DEFAULT_EXTRACT_SETTLE_SECS,
            default_session: None,
        }
    }
}

/// `[display]` table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    pub color: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { color: true }
    }
}
