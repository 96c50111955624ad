//! Automation script model: sequences, pane layouts and command steps.
//!
//! A script is a mapping of sequence names to sequence definitions. A small
//! set of reserved top-level keys (`DEFINES`, `TITLE`, …) never names a
//! sequence; every other key does.

pub mod command;
pub mod keyword;
pub mod loader;
pub mod pane_index;

use serde_yaml::Value;

use crate::error::ScriptError;

pub use command::{Action, Command, CommandDict, DecideSpec, ExtractSpec, PaneRef, PromptSpec};
pub use keyword::Keyword;
pub use loader::{load_script, parse_script, ScriptFormat};
pub use pane_index::PaneIndex;

use command::scalar_text;

/// Top-level keys that are never sequence names.
pub const RESERVED_KEYS: [&str; 7] = [
    "DEFINES",
    "TITLE",
    "DESC",
    "SESSION",
    "NEW_WINDOW",
    "NEW_PANES",
    "CMDS",
];

/// One named pane of a `NEW_PANES` layout.
#[derive(Debug, Clone)]
pub struct PaneDef {
    pub name: String,
    pub commands: CommandDict,
}

/// One runnable sequence.
#[derive(Debug, Clone)]
pub struct Sequence {
    pub name: String,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub session: Option<String>,
    pub new_window: Option<String>,
    /// Window selected (or created) before `CMDS` run.
    pub window: Option<String>,
    pub panes: Option<Vec<PaneDef>>,
    pub cmds: Option<Vec<CommandDict>>,
    source: Value,
}

impl Sequence {
    fn parse(name: &str, value: &Value) -> Result<Self, ScriptError> {
        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ScriptError::Invalid(format!(
                    "sequence `{name}` must be a mapping"
                )))
            }
        };
        let text = |key: &str| -> Result<Option<String>, ScriptError> {
            match mapping.get(key) {
                None | Some(Value::Null) => Ok(None),
                Some(value) => scalar_text(value).map(Some).ok_or_else(|| {
                    ScriptError::Invalid(format!("sequence `{name}`: {key} must be a string"))
                }),
            }
        };

        let panes = match mapping.get("NEW_PANES") {
            None => None,
            Some(value) => Some(parse_panes(name, value)?),
        };
        let cmds = match mapping.get("CMDS") {
            None => None,
            Some(Value::Null) => Some(Vec::new()),
            Some(Value::Sequence(items)) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| {
                        CommandDict::parse(item, &format!("sequence `{name}` CMDS[{}]", idx + 1))
                    })
                    .collect::<Result<_, _>>()?,
            ),
            Some(_) => {
                return Err(ScriptError::Invalid(format!(
                    "sequence `{name}`: CMDS must be a list"
                )))
            }
        };

        Ok(Self {
            name: name.to_string(),
            title: text("TITLE")?,
            desc: text("DESC")?,
            session: text("SESSION")?,
            new_window: text("NEW_WINDOW")?,
            window: text("WINDOW")?,
            panes,
            cmds,
            source: value.clone(),
        })
    }

    /// Banner title: the new window's name, else `TITLE`, else empty.
    pub fn banner_title(&self) -> &str {
        self.new_window
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or_default()
    }

    /// `(window, panes)` when the sequence declares a window layout.
    pub fn layout(&self) -> Option<(&str, &[PaneDef])> {
        match (self.new_window.as_deref(), self.panes.as_deref()) {
            (Some(window), Some(panes)) => Some((window, panes)),
            _ => None,
        }
    }

    /// The sequence as written in the script.
    pub fn source(&self) -> &Value {
        &self.source
    }
}

fn parse_panes(sequence: &str, value: &Value) -> Result<Vec<PaneDef>, ScriptError> {
    let Value::Sequence(items) = value else {
        return Err(ScriptError::Invalid(format!(
            "sequence `{sequence}`: NEW_PANES must be a list"
        )));
    };
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let position = idx + 1;
            let entry = match item {
                Value::Mapping(mapping) if mapping.len() == 1 => mapping.iter().next(),
                _ => None,
            };
            let Some((key, commands)) = entry else {
                return Err(ScriptError::Invalid(format!(
                    "sequence `{sequence}`: NEW_PANES entry {position} must map one pane name to its commands"
                )));
            };
            let name = scalar_text(key).ok_or_else(|| {
                ScriptError::Invalid(format!(
                    "sequence `{sequence}`: NEW_PANES entry {position} has a non-string pane name"
                ))
            })?;
            let commands =
                CommandDict::parse(commands, &format!("sequence `{sequence}` pane `{name}`"))?;
            Ok(PaneDef { name, commands })
        })
        .collect()
}

/// A loaded, validated script.
#[derive(Debug, Clone, Default)]
pub struct Script {
    defines: Vec<(String, String)>,
    sequences: Vec<Sequence>,
    pane_index: PaneIndex,
}

impl Script {
    /// Build a script from its parsed document root.
    pub fn from_value(root: &Value) -> Result<Self, ScriptError> {
        let mapping = match root {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ScriptError::Invalid(
                    "top level must be a mapping of sequences".into(),
                ))
            }
        };

        let mut script = Self::default();
        for (key, value) in mapping {
            let name = scalar_text(key).ok_or_else(|| {
                ScriptError::Invalid("top-level keys must be strings".into())
            })?;
            if name == "DEFINES" {
                script.defines = parse_defines(value)?;
                continue;
            }
            if RESERVED_KEYS.contains(&name.as_str()) {
                continue;
            }
            script.sequences.push(Sequence::parse(&name, value)?);
        }

        for sequence in &script.sequences {
            if let Some((window, panes)) = sequence.layout() {
                script
                    .pane_index
                    .register_layout(window, panes.iter().map(|pane| pane.name.as_str()));
            }
        }
        Ok(script)
    }

    /// `DEFINES` entries in script order.
    pub fn defines(&self) -> &[(String, String)] {
        &self.defines
    }

    pub fn sequence(&self, name: &str) -> Option<&Sequence> {
        self.sequences.iter().find(|sequence| sequence.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sequence(name).is_some()
    }

    /// Runnable sequence names in script order.
    pub fn sequence_names(&self) -> impl Iterator<Item = &str> {
        self.sequences.iter().map(|sequence| sequence.name.as_str())
    }

    pub fn pane_index(&self) -> &PaneIndex {
        &self.pane_index
    }
}

fn parse_defines(value: &Value) -> Result<Vec<(String, String)>, ScriptError> {
    let mapping = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(ScriptError::Invalid("DEFINES must be a mapping".into())),
    };
    mapping
        .iter()
        .map(|(key, value)| {
            let key = scalar_text(key)
                .ok_or_else(|| ScriptError::Invalid("DEFINES keys must be strings".into()))?;
            let value = match value {
                Value::Null => String::new(),
                other => scalar_text(other).ok_or_else(|| {
                    ScriptError::Invalid(format!("DEFINES `{key}` must be a scalar"))
                })?,
            };
            Ok((key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(text: &str) -> Result<Script, ScriptError> {
        Script::from_value(&serde_yaml::from_str(text).unwrap())
    }

    #[test]
    fn reserved_keys_are_not_sequences() {
        let script = script(
            "DEFINES:\n  HOST: x1\n  PORT: 22\nTITLE: ignored\nbuild:\n  CMDS:\n    - SHELL: make\ntest:\n  CMDS: []\n",
        )
        .unwrap();
        assert_eq!(script.sequence_names().collect::<Vec<_>>(), ["build", "test"]);
        assert_eq!(
            script.defines(),
            [("HOST".to_string(), "x1".to_string()), ("PORT".to_string(), "22".to_string())]
        );
        assert!(!script.contains("TITLE"));
    }

    #[test]
    fn pane_index_built_from_layouts() {
        let script = script(
            "dev:\n  NEW_WINDOW: build\n  NEW_PANES:\n    - left:\n        SHELL: make\n    - right:\n        SHELL: tail -f log\n",
        )
        .unwrap();
        assert_eq!(script.pane_index().get("build", "left"), Some(1));
        assert_eq!(script.pane_index().get("build", "right"), Some(2));
        let dev = script.sequence("dev").unwrap();
        assert_eq!(dev.banner_title(), "build");
        assert_eq!(dev.layout().map(|(_, panes)| panes.len()), Some(2));
    }

    #[test]
    fn panes_without_new_window_are_not_indexed() {
        let script = script("dev:\n  NEW_PANES:\n    - left:\n        SHELL: make\n").unwrap();
        assert!(script.pane_index().is_empty());
        assert!(script.sequence("dev").unwrap().layout().is_none());
    }

    #[test]
    fn malformed_pane_entry_fails_at_load() {
        let err = script(
            "dev:\n  NEW_WINDOW: build\n  NEW_PANES:\n    - left:\n        SHELL: make\n      right:\n        SHELL: ls\n",
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("NEW_PANES entry 1"), "got: {msg}");
    }

    #[test]
    fn empty_pane_commands_are_allowed() {
        let script =
            script("dev:\n  NEW_WINDOW: w\n  NEW_PANES:\n    - idle:\n    - busy:\n        SHELL: top\n")
                .unwrap();
        let (_, panes) = script.sequence("dev").unwrap().layout().unwrap();
        assert!(panes[0].commands.is_empty());
        assert_eq!(panes[1].name, "busy");
    }

    #[test]
    fn bad_payload_names_its_location() {
        let err = script("build:\n  CMDS:\n    - SHELL: ok\n    - ABORT: soon\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("CMDS[2]"), "got: {msg}");
        assert!(msg.contains("ABORT"), "got: {msg}");
    }

    #[test]
    fn empty_document_is_an_empty_script() {
        let script = script("").unwrap();
        assert_eq!(script.sequence_names().count(), 0);
    }
}
