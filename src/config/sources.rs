//! Settings-file source discovery.
//!
//! Source order implements the precedence contract:
//! explicit path > local file > global file > built-in defaults.

use std::path::{Path, PathBuf};

use crate::error::SettingsError;

use super::defaults::SETTINGS_FILE_NAME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum SettingsSource {
    /// Loaded from explicit `--settings` path.
    Explicit(PathBuf),
    /// Loaded from `./muxseq.toml`.
    Local,
    /// Loaded from `<config root>/muxseq/muxseq.toml`.
    Global(PathBuf),
    /// No file found; defaults were used.
    BuiltInDefaults,
}

/// Read settings text from the highest-precedence available source.
pub(super) fn read_settings_text_with_sources<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, SettingsSource), SettingsError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    // 1) An explicit path must exist.
    if let Some(p) = path_override {
        let path = PathBuf::from(p);
        let text = read_file(&path)?;
        return Ok((text, SettingsSource::Explicit(path)));
    }

    // 2) Local file in the working directory.
    if let Ok(text) = read_file(Path::new(SETTINGS_FILE_NAME)) {
        return Ok((text, SettingsSource::Local));
    }

    // 3) Global file under the config root.
    if let Some(dir) = config_root() {
        let global = dir.join("muxseq").join(SETTINGS_FILE_NAME);
        if let Ok(text) = read_file(&global) {
            return Ok((text, SettingsSource::Global(global)));
        }
    }

    // 4) Nothing found; caller parses empty text into defaults.
    Ok((String::new(), SettingsSource::BuiltInDefaults))
}

/// `$XDG_CONFIG_HOME`, else `~/.config`, else the platform config dir.
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}
