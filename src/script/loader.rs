//! Script file loading (YAML or JSON, chosen by extension).

use std::path::Path;

use serde_yaml::Value;

use crate::error::ScriptError;

use super::Script;

/// On-disk script encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    Yaml,
    Json,
}

impl ScriptFormat {
    /// Pick the format from a file extension (`.yaml`, `.yml`, `.json`).
    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ScriptError::Invalid(format!(
                "`{}`: expected a .yaml, .yml or .json file",
                path.display()
            ))),
        }
    }
}

/// Read and validate a script file.
pub fn load_script(path: &Path) -> Result<Script, ScriptError> {
    let format = ScriptFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    parse_script(&text, format)
}

/// Parse script text in the given format.
pub fn parse_script(text: &str, format: ScriptFormat) -> Result<Script, ScriptError> {
    let root: Value = match format {
        ScriptFormat::Yaml => serde_yaml::from_str(text)?,
        ScriptFormat::Json if text.trim().is_empty() => Value::Null,
        ScriptFormat::Json => serde_json::from_str(text)?,
    };
    Script::from_value(&root)
}
