//! Unified error types for script loading, tmux transport and runs.

use std::fmt;

// ---------------------------------------------------------------------------
// DriverError
// ---------------------------------------------------------------------------

/// Errors arising from terminal driver calls.
#[derive(Debug)]
pub enum DriverError {
    /// The multiplexer binary could not be started.
    Spawn(String),
    /// The multiplexer ran but reported a failure.
    CommandFailed(String),
    /// Local I/O around a driver call failed (sink files, capture files).
    Io(std::io::Error),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(msg) => write!(f, "spawn failed: {msg}"),
            Self::CommandFailed(msg) => write!(f, "command failed: {msg}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for DriverError {}

impl From<std::io::Error> for DriverError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// ScriptError
// ---------------------------------------------------------------------------

/// Errors when loading or validating an automation script.
#[derive(Debug)]
pub enum ScriptError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Yaml(e) => write!(f, "yaml: {e}"),
            Self::Json(e) => write!(f, "json: {e}"),
            Self::Invalid(msg) => write!(f, "invalid script: {msg}"),
        }
    }
}

impl std::error::Error for ScriptError {}

impl From<std::io::Error> for ScriptError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for ScriptError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

impl From<serde_json::Error> for ScriptError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

// ---------------------------------------------------------------------------
// SettingsError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing tool settings.
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// RunError: top-level
// ---------------------------------------------------------------------------

/// Top-level error type for a muxseq invocation.
#[derive(Debug)]
pub enum RunError {
    Script(ScriptError),
    Settings(SettingsError),
    Driver(DriverError),
    /// A sequence requested on the command line is not in the script.
    UnknownSequence(String),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Script(e) => write!(f, "script: {e}"),
            Self::Settings(e) => write!(f, "settings: {e}"),
            Self::Driver(e) => write!(f, "driver: {e}"),
            Self::UnknownSequence(name) => write!(f, "no sequence named `{name}`"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<ScriptError> for RunError {
    fn from(e: ScriptError) -> Self {
        Self::Script(e)
    }
}

impl From<SettingsError> for RunError {
    fn from(e: SettingsError) -> Self {
        Self::Settings(e)
    }
}

impl From<DriverError> for RunError {
    fn from(e: DriverError) -> Self {
        Self::Driver(e)
    }
}
