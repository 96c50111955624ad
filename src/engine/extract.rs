//! EXTRACT: run a command, capture what the pane prints, bind regex groups.

use std::slice;

use regex::Regex;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::driver::TerminalDriver;
use crate::script::ExtractSpec;

use super::{Context, Engine};

/// Variable bindings for the first match of `pattern` in `text`, paired
/// positionally with capture groups 1, 2, … Groups that did not take part in
/// the match bind an empty string. No match binds nothing.
pub fn match_bindings(pattern: &Regex, vars: &[String], text: &str) -> Vec<(String, String)> {
    let Some(captures) = pattern.captures(text) else {
        return Vec::new();
    };
    vars.iter()
        .zip(1..pattern.captures_len())
        .map(|(var, group)| {
            let value = captures.get(group).map_or("", |m| m.as_str());
            (var.clone(), value.to_string())
        })
        .collect()
}

impl<'a, D: TerminalDriver> Engine<'a, D> {
    pub(super) async fn extract(&mut self, spec: &ExtractSpec, ctx: &mut Context) {
        let output = match NamedTempFile::new() {
            Ok(file) => file,
            Err(err) => {
                self.sink
                    .error(&format!("EXTRACT: cannot create output sink: {err}"));
                return;
            }
        };
        let target = ctx.target();
        if let Err(err) = self.driver.pipe_to_sink(&target, output.path()).await {
            self.report(&format!("pipe-pane {target}"), err);
            return;
        }
        self.send_shell(ctx, slice::from_ref(&spec.command)).await;
        tokio::time::sleep(self.options.extract_settle).await;
        if let Err(err) = self.driver.stop_pipe(&target).await {
            self.report(&format!("pipe-pane {target}"), err);
        }

        let text = match tokio::fs::read_to_string(output.path()).await {
            Ok(text) => text,
            Err(err) => {
                self.sink.warn(&format!("EXTRACT: cannot read output: {err}"));
                return;
            }
        };
        let bindings = match_bindings(&spec.pattern, &spec.vars, &text);
        if bindings.is_empty() {
            debug!(pattern = spec.pattern.as_str(), "EXTRACT matched nothing");
        }
        for (key, value) in bindings {
            self.sink.activity(&format!("{key}={value}"));
            if let Err(err) = self.driver.set_environment(&key, &value).await {
                self.report(&format!("set-environment {key}"), err);
            }
            self.env.set(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::recording::{DriverCall, RecordingDriver};
    use crate::engine::{EngineOptions, Flow};
    use crate::script::{parse_script, ScriptFormat};
    use crate::testsupport::{RecordingSink, ScriptedInput};
    use std::time::Duration;

    fn vars(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn binds_groups_positionally() {
        let pattern = Regex::new(r"version: (\d+)").unwrap();
        assert_eq!(
            match_bindings(&pattern, &vars(&["VER"]), "tool\nversion: 7\n"),
            [("VER".to_string(), "7".to_string())]
        );
    }

    #[test]
    fn no_match_binds_nothing() {
        let pattern = Regex::new(r"version: (\d+)").unwrap();
        assert!(match_bindings(&pattern, &vars(&["VER"]), "command not found").is_empty());
    }

    #[test]
    fn optional_group_binds_empty_and_extra_vars_are_ignored() {
        let pattern = Regex::new(r"(\d+)(?:\.(\d+))?").unwrap();
        assert_eq!(
            match_bindings(&pattern, &vars(&["MAJOR", "MINOR", "PATCH"]), "v3"),
            [
                ("MAJOR".to_string(), "3".to_string()),
                ("MINOR".to_string(), String::new()),
            ]
        );
    }

    #[tokio::test]
    async fn extract_pipes_sends_and_binds() {
        let script = parse_script(
            "seq:\n  CMDS:\n    - EXTRACT: [\"tool --version\", 'version: (\\d+)', VER]\n    - SHELL: echo ${VER}\n",
            ScriptFormat::Yaml,
        )
        .unwrap();
        let sink = RecordingSink::default();
        let mut input = ScriptedInput::default();
        let driver = RecordingDriver::default().with_pipe_output("$ tool --version\nversion: 7\n");
        let options = EngineOptions {
            extract_settle: Duration::ZERO,
            ..EngineOptions::default()
        };
        let mut engine = Engine::new(&script, driver, &sink, &mut input, options);
        assert_eq!(engine.run_sequence("seq").await, Flow::Continue);
        assert_eq!(engine.env().get("VER"), Some("7"));
        let calls = engine.driver().calls();
        assert!(matches!(calls[0], DriverCall::Pipe(_)));
        assert_eq!(calls[1], DriverCall::Shell(String::new(), "tool --version".into()));
        assert_eq!(calls[2], DriverCall::StopPipe(String::new()));
        assert_eq!(calls[3], DriverCall::SetEnv("VER".into(), "7".into()));
        assert_eq!(engine.driver().shell_lines(), ["tool --version", "echo 7"]);
    }

    #[tokio::test]
    async fn unmatched_extract_binds_nothing() {
        let script = parse_script(
            "seq:\n  CMDS:\n    - EXTRACT: [\"tool --version\", 'version: (\\d+)', VER]\n",
            ScriptFormat::Yaml,
        )
        .unwrap();
        let sink = RecordingSink::default();
        let mut input = ScriptedInput::default();
        let options = EngineOptions {
            extract_settle: Duration::ZERO,
            ..EngineOptions::default()
        };
        let mut engine = Engine::new(&script, RecordingDriver::default(), &sink, &mut input, options);
        assert_eq!(engine.run_sequence("seq").await, Flow::Continue);
        assert!(engine.env().get("VER").is_none());
        assert!(sink.entries().iter().all(|(kind, _)| kind != "error"));
    }
}
