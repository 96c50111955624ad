//! Default settings constants.

/// tmux client binary looked up on `PATH`.
pub(super) const DEFAULT_TMUX_BINARY: &str = "tmux";
/// Script file read when `--file` is not given.
pub(super) const DEFAULT_SCRIPT_FILE: &str = "muxseq.yaml";
/// Seconds EXTRACT waits for a command's output before reading it.
pub(super) const DEFAULT_EXTRACT_SETTLE_SECS: f64 = 1.0;
/// Local settings file name, also used under the global config root.
pub(super) const SETTINGS_FILE_NAME: &str = "muxseq.toml";
