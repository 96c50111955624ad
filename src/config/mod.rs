//! Tool settings loaded from TOML files and environment variables.
//!
//! Settings are resolved in this order of precedence (highest wins):
//! 1. Environment variables (`MUXSEQ_TMUX_BIN`, `MUXSEQ_SCRIPT`,
//!    `MUXSEQ_EXTRACT_SETTLE_SECS`)
//! 2. TOML file given via `--settings`
//! 3. `./muxseq.toml` in the current directory
//! 4. `$XDG_CONFIG_HOME/muxseq/muxseq.toml` (or `~/.config/muxseq/muxseq.toml`)
//! 5. Built-in defaults
//!
//! These are settings of the tool itself. Automation scripts are loaded by
//! [`crate::script`].

mod defaults;
mod env;
mod loader;
mod sources;
mod types;

pub use loader::load_settings;
pub use sources::config_root_dir;
pub use types::{DisplaySettings, RunSettings, Settings, TmuxSettings};
