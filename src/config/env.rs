//! `MUXSEQ_*` environment overrides.

use crate::error::SettingsError;

use super::Settings;

pub(super) fn apply_env_overrides<FEnv>(
    settings: &mut Settings,
    env_lookup: &FEnv,
) -> Result<(), SettingsError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(binary) = non_empty(env_lookup, "MUXSEQ_TMUX_BIN") {
        settings.tmux.binary = binary;
    }
    if let Some(script) = non_empty(env_lookup, "MUXSEQ_SCRIPT") {
        settings.run.script = script;
    }
    if let Some(secs) = non_empty(env_lookup, "MUXSEQ_EXTRACT_SETTLE_SECS") {
        settings.run.extract_settle_secs = secs.trim().parse::<f64>().map_err(|_| {
            SettingsError::Invalid(format!(
                "invalid MUXSEQ_EXTRACT_SETTLE_SECS value `{secs}`: expected seconds"
            ))
        })?;
    }
    Ok(())
}

/// Value of `name`, ignoring unset and blank variables.
fn non_empty<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name).filter(|value| !value.trim().is_empty())
}
