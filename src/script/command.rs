//! Typed command payloads parsed out of command dictionaries.
//!
//! Payloads are validated once at load time so the engine never has to
//! re-interpret raw YAML while a sequence is running.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use regex::Regex;
use serde_yaml::Value;

use crate::error::ScriptError;

use super::keyword::Keyword;

/// Default PAUSE length when the payload is empty.
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

/// Pane reference: a declared pane name or a raw tmux pane index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneRef {
    Index(usize),
    Name(String),
}

impl fmt::Display for PaneRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(idx) => write!(f, "{idx}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// `EXTRACT: [command, regex, var...]`.
#[derive(Debug, Clone)]
pub struct ExtractSpec {
    pub command: String,
    pub pattern: Regex,
    /// Variable names bound positionally to the regex capture groups.
    pub vars: Vec<String>,
}

/// `PROMPT: banner` or `PROMPT: [banner, key]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub banner: String,
    pub key: Option<String>,
}

/// One action run by a matching DECIDE branch.
#[derive(Debug, Clone)]
pub enum Action {
    /// Keyword/payload pairs, dispatched in fixed priority order.
    Dispatch(CommandDict),
    /// Bare string, sent as a SHELL line.
    Shell(String),
}

/// `DECIDE: { KEY: var, <value>: action(s), ... }`.
#[derive(Debug, Clone)]
pub struct DecideSpec {
    /// Environment variable to branch on. `None` when the script omitted `KEY`.
    pub key: Option<String>,
    branches: Vec<(String, Vec<Action>)>,
}

impl DecideSpec {
    /// Actions for the branch whose key equals `value`.
    pub fn branch(&self, value: &str) -> Option<&[Action]> {
        self.branches
            .iter()
            .find(|(key, _)| key == value)
            .map(|(_, actions)| actions.as_slice())
    }

    pub fn branch_keys(&self) -> impl Iterator<Item = &str> {
        self.branches.iter().map(|(key, _)| key.as_str())
    }
}

/// A keyword with its validated payload.
#[derive(Debug, Clone)]
pub enum Command {
    Session(String),
    Window(String),
    Pane(PaneRef),
    /// `None` requests tmux's default split.
    Split(Option<String>),
    Delay(Duration),
    Echo(String),
    Sequence(String),
    Shell(Vec<String>),
    Extract(ExtractSpec),
    /// `None` captures to the console instead of a file.
    Capture(Option<PathBuf>),
    Prompt(PromptSpec),
    Decide(DecideSpec),
    Pause(Duration),
    Abort(i32),
}

impl Command {
    pub fn keyword(&self) -> Keyword {
        match self {
            Self::Session(_) => Keyword::Session,
            Self::Window(_) => Keyword::Window,
            Self::Pane(_) => Keyword::Pane,
            Self::Split(_) => Keyword::Split,
            Self::Delay(_) => Keyword::Delay,
            Self::Echo(_) => Keyword::Echo,
            Self::Sequence(_) => Keyword::Sequence,
            Self::Shell(_) => Keyword::Shell,
            Self::Extract(_) => Keyword::Extract,
            Self::Capture(_) => Keyword::Capture,
            Self::Prompt(_) => Keyword::Prompt,
            Self::Decide(_) => Keyword::Decide,
            Self::Pause(_) => Keyword::Pause,
            Self::Abort(_) => Keyword::Abort,
        }
    }

    /// Validate `payload` for `keyword`. Errors are plain messages; the caller
    /// adds the script location.
    pub fn parse(keyword: Keyword, payload: &Value) -> Result<Self, String> {
        let command = match keyword {
            Keyword::Session => Self::Session(required_text(payload)?),
            Keyword::Window => Self::Window(required_text(payload)?),
            Keyword::Pane => Self::Pane(parse_pane_ref(payload)?),
            Keyword::Split => Self::Split(optional_text(payload)?.filter(|opts| !opts.is_empty())),
            Keyword::Delay => Self::Delay(parse_seconds(payload)?.unwrap_or_default()),
            Keyword::Echo => Self::Echo(scalar_text(payload).unwrap_or_default()),
            Keyword::Sequence => Self::Sequence(required_text(payload)?),
            Keyword::Shell => Self::Shell(parse_lines(payload)?),
            Keyword::Extract => Self::Extract(parse_extract(payload)?),
            Keyword::Capture => Self::Capture(match payload {
                Value::Null | Value::Bool(_) => None,
                other => Some(PathBuf::from(required_text(other)?)),
            }),
            Keyword::Prompt => Self::Prompt(parse_prompt(payload)?),
            Keyword::Decide => Self::Decide(parse_decide(payload)?),
            Keyword::Pause => Self::Pause(parse_seconds(payload)?.unwrap_or(DEFAULT_PAUSE)),
            Keyword::Abort => Self::Abort(parse_exit_code(payload)?),
        };
        Ok(command)
    }
}

/// One step: the keywords present in a dictionary plus any unknown keys.
#[derive(Debug, Clone, Default)]
pub struct CommandDict {
    commands: BTreeMap<Keyword, Command>,
    payloads: BTreeMap<Keyword, String>,
    unknown: Vec<String>,
}

impl CommandDict {
    /// Parse a mapping of keyword → payload. `null` is an empty dictionary.
    pub fn parse(value: &Value, context: &str) -> Result<Self, ScriptError> {
        let mut dict = Self::default();
        let mapping = match value {
            Value::Null => return Ok(dict),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ScriptError::Invalid(format!(
                    "{context}: expected a mapping of keywords"
                )))
            }
        };
        for (key, payload) in mapping {
            let name = scalar_text(key).ok_or_else(|| {
                ScriptError::Invalid(format!("{context}: keyword must be a string"))
            })?;
            let Some(keyword) = Keyword::parse(&name) else {
                dict.unknown.push(name);
                continue;
            };
            let command = Command::parse(keyword, payload)
                .map_err(|msg| ScriptError::Invalid(format!("{context}: {keyword}: {msg}")))?;
            dict.payloads.insert(keyword, payload_text(payload));
            dict.commands.insert(keyword, command);
        }
        Ok(dict)
    }

    pub fn get(&self, keyword: Keyword) -> Option<&Command> {
        self.commands.get(&keyword)
    }

    pub fn contains(&self, keyword: Keyword) -> bool {
        self.commands.contains_key(&keyword)
    }

    /// Keys that matched no keyword, in script order.
    pub fn unknown_keys(&self) -> &[String] {
        &self.unknown
    }

    /// Compact rendering of the payload as written, for step-mode prompts.
    pub fn payload_text(&self, keyword: Keyword) -> &str {
        self.payloads
            .get(&keyword)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.unknown.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Payload helpers
// ---------------------------------------------------------------------------

/// Text of a scalar YAML node. Numbers and booleans are stringified.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(num) => Some(num.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

fn payload_text(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| {
        serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
    })
}

fn required_text(value: &Value) -> Result<String, String> {
    scalar_text(value).ok_or_else(|| "expected a string".to_string())
}

fn optional_text(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        other => required_text(other).map(Some),
    }
}

fn parse_pane_ref(value: &Value) -> Result<PaneRef, String> {
    if let Some(idx) = value.as_u64() {
        return Ok(PaneRef::Index(idx as usize));
    }
    required_text(value).map(PaneRef::Name)
}

fn parse_seconds(value: &Value) -> Result<Option<Duration>, String> {
    let secs = match value {
        Value::Null => return Ok(None),
        Value::Number(num) => num.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| "expected a number of seconds".to_string())?;
    if secs < 0.0 {
        return Err(format!("invalid number of seconds `{secs}`"));
    }
    Duration::try_from_secs_f64(secs)
        .map(Some)
        .map_err(|_| format!("invalid number of seconds `{secs}`"))
}

fn parse_exit_code(value: &Value) -> Result<i32, String> {
    let code = match value {
        Value::Number(num) => num.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| "expected an integer exit code".to_string())?;
    i32::try_from(code).map_err(|_| format!("exit code `{code}` out of range"))
}

fn parse_lines(value: &Value) -> Result<Vec<String>, String> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .map(|item| scalar_text(item).ok_or_else(|| "expected a list of strings".to_string()))
            .collect(),
        other => Ok(vec![required_text(other)?]),
    }
}

fn parse_extract(value: &Value) -> Result<ExtractSpec, String> {
    let Value::Sequence(items) = value else {
        return Err("expected [command, regex, var...]".to_string());
    };
    let texts = items
        .iter()
        .map(|item| scalar_text(item).ok_or_else(|| "expected a list of strings".to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    let [command, pattern, vars @ ..] = texts.as_slice() else {
        return Err("expected at least a command and a regex".to_string());
    };
    let pattern = Regex::new(pattern).map_err(|e| format!("bad regex: {e}"))?;
    Ok(ExtractSpec {
        command: command.clone(),
        pattern,
        vars: vars.to_vec(),
    })
}

fn parse_prompt(value: &Value) -> Result<PromptSpec, String> {
    match value {
        Value::Sequence(items) => {
            let banner = items
                .first()
                .and_then(scalar_text)
                .ok_or_else(|| "expected [banner, key]".to_string())?;
            let key = items.get(1).and_then(scalar_text);
            Ok(PromptSpec { banner, key })
        }
        other => Ok(PromptSpec {
            banner: required_text(other)?,
            key: None,
        }),
    }
}

fn parse_decide(value: &Value) -> Result<DecideSpec, String> {
    let Value::Mapping(mapping) = value else {
        return Err("expected a mapping with KEY and branches".to_string());
    };
    let mut key = None;
    let mut branches = Vec::new();
    for (branch, payload) in mapping {
        let name = scalar_text(branch).ok_or_else(|| "branch keys must be scalars".to_string())?;
        if name == "KEY" {
            key = Some(required_text(payload)?);
            continue;
        }
        let actions: Vec<Action> = match payload {
            Value::Null => Vec::new(),
            Value::Sequence(items) => items
                .iter()
                .map(|item| parse_action(&name, item))
                .collect::<Result<_, _>>()?,
            other => vec![parse_action(&name, other)?],
        };
        branches.push((name, actions));
    }
    Ok(DecideSpec { key, branches })
}

fn parse_action(branch: &str, value: &Value) -> Result<Action, String> {
    match value {
        Value::Mapping(_) => CommandDict::parse(value, &format!("branch `{branch}`"))
            .map(Action::Dispatch)
            .map_err(|e| e.to_string()),
        other => scalar_text(other)
            .map(Action::Shell)
            .ok_or_else(|| format!("branch `{branch}`: expected a command or keyword mapping")),
    }
}
