//! Top-level settings loading pipeline.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::error::SettingsError;

use super::env::apply_env_overrides;
use super::sources::{config_root_dir, read_settings_text_with_sources};
use super::Settings;

/// Load settings from disk and environment.
///
/// `path_override` is an explicit settings file path (from `--settings`).
pub fn load_settings(path_override: Option<&str>) -> Result<Settings, SettingsError> {
    load_settings_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(super) fn load_settings_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Settings, SettingsError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (text, source) = read_settings_text_with_sources(path_override, &read_file, &config_root)?;
    debug!(?source, "settings source");
    let mut settings: Settings = toml::from_str(&text)?;
    apply_env_overrides(&mut settings, &env_lookup)?;
    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), SettingsError> {
    let secs = settings.run.extract_settle_secs;
    if Duration::try_from_secs_f64(secs).is_err() {
        return Err(SettingsError::Invalid(format!(
            "run.extract_settle_secs must be a non-negative number of seconds, got {secs}"
        )));
    }
    if settings.tmux.binary.trim().is_empty() {
        return Err(SettingsError::Invalid("tmux.binary must not be empty".into()));
    }
    Ok(())
}
