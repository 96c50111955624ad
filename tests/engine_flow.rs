//! End-to-end runs of whole scripts against the recording driver.

use std::io;
use std::sync::Mutex;
use std::time::Duration;

use muxseq::driver::recording::{DriverCall, RecordingDriver};
use muxseq::engine::{Engine, EngineOptions};
use muxseq::runner;
use muxseq::script::{parse_script, Script, ScriptFormat};
use muxseq::ui::{LineInput, RenderSink};

#[derive(Default)]
struct MockRenderer {
    entries: Mutex<Vec<(String, String)>>,
}

impl MockRenderer {
    fn record(&self, kind: &str, message: &str) {
        self.entries
            .lock()
            .expect("mock renderer lock")
            .push((kind.to_string(), message.to_string()));
    }

    fn saw(&self, kind: &str, needle: &str) -> bool {
        self.entries
            .lock()
            .expect("mock renderer lock")
            .iter()
            .any(|(k, msg)| k == kind && msg.contains(needle))
    }
}

impl RenderSink for MockRenderer {
    fn banner(&self, title: &str, desc: &str) {
        self.record("banner", &format!("{title}|{desc}"));
    }
    fn activity(&self, text: &str) {
        self.record("activity", text);
    }
    fn decision(&self, text: &str) {
        self.record("decision", text);
    }
    fn redirect(&self, target: &str) {
        self.record("redirect", target);
    }
    fn echo(&self, message: &str) {
        self.record("echo", message);
    }
    fn output_block(&self, text: &str) {
        self.record("output", text);
    }
    fn plain(&self, text: &str) {
        self.record("plain", text);
    }
    fn warn(&self, msg: &str) {
        self.record("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.record("error", msg);
    }
}

/// Answers every prompt with the same line.
struct FixedInput(&'static str);

impl LineInput for FixedInput {
    fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
        Ok(self.0.to_string())
    }
}

fn options() -> EngineOptions {
    EngineOptions {
        extract_settle: Duration::ZERO,
        ..EngineOptions::default()
    }
}

async fn run_script(
    script: &Script,
    driver: RecordingDriver,
    answer: &'static str,
    names: &[&str],
) -> (i32, RecordingDriver, MockRenderer) {
    let renderer = MockRenderer::default();
    let mut input = FixedInput(answer);
    let names: Vec<String> = names.iter().map(|name| name.to_string()).collect();
    let (code, driver) = {
        let mut engine = Engine::new(script, driver, &renderer, &mut input, options());
        let code = runner::run(&mut engine, &names).await.expect("run");
        (code, engine.into_driver())
    };
    (code, driver, renderer)
}

#[tokio::test]
async fn two_pane_window_splits_before_second_pane() {
    let script = parse_script(
        r#"{"dev": {"NEW_WINDOW": "build", "NEW_PANES": [{"left": {"SHELL": "make"}}, {"right": {"SHELL": "tail -f log"}}]}}"#,
        ScriptFormat::Json,
    )
    .unwrap();
    let (code, driver, renderer) = run_script(&script, RecordingDriver::new(), "", &["dev"]).await;
    assert_eq!(code, 0);
    assert_eq!(
        driver.calls(),
        [
            DriverCall::Window(None, "build".into()),
            DriverCall::Shell("build.1".into(), "make".into()),
            DriverCall::Split("build".into(), None),
            DriverCall::Shell("build.2".into(), "tail -f log".into()),
        ]
    );
    assert!(renderer.saw("banner", "build|"));
}

#[tokio::test]
async fn explicit_split_replaces_default_split() {
    let script = parse_script(
        "dev:\n  SESSION: work\n  NEW_WINDOW: build\n  NEW_PANES:\n    - left:\n        SHELL: make\n    - right:\n        SPLIT: -h -p 30\n        SHELL: htop\n",
        ScriptFormat::Yaml,
    )
    .unwrap();
    let (_, driver, _) = run_script(&script, RecordingDriver::new(), "", &["dev"]).await;
    assert_eq!(
        driver.calls(),
        [
            DriverCall::Session("work".into()),
            DriverCall::Window(Some("work".into()), "build".into()),
            DriverCall::Shell("work:build.1".into(), "make".into()),
            DriverCall::Split("work:build".into(), Some("-h -p 30".into())),
            DriverCall::Shell("work:build.2".into(), "htop".into()),
        ]
    );
}

#[tokio::test]
async fn prompt_decide_and_redirect_chain() {
    let script = parse_script(
        r#"
DEFINES:
  TARGET: staging
ask:
  TITLE: Pick a mode
  CMDS:
    - PROMPT: ["mode? ", mode]
    - DECIDE:
        KEY: mode
        fast: echo fast ${TARGET}
        full:
          - ECHO: going full
          - SEQUENCE: deploy
    - SHELL: echo after-decide
deploy:
  CMDS:
    - SHELL: ./deploy.sh ${TARGET}
"#,
        ScriptFormat::Yaml,
    )
    .unwrap();

    let (_, fast, _) = run_script(&script, RecordingDriver::new(), "fast", &["ask"]).await;
    assert_eq!(
        fast.shell_lines(),
        ["echo fast staging", "echo after-decide"]
    );

    let (_, full, renderer) = run_script(&script, RecordingDriver::new(), "full", &["ask"]).await;
    assert_eq!(full.shell_lines(), ["./deploy.sh staging"]);
    assert!(renderer.saw("echo", "going full"));
    assert!(renderer.saw("redirect", "deploy"));
}

#[tokio::test]
async fn extracted_value_feeds_later_sequence() {
    let script = parse_script(
        "probe:\n  CMDS:\n    - EXTRACT: [\"git describe\", 'v(\\d+)\\.(\\d+)', MAJOR, MINOR]\nuse:\n  CMDS:\n    - SHELL: echo ${MAJOR}.${MINOR} ${PATCH}\n",
        ScriptFormat::Yaml,
    )
    .unwrap();
    let driver = RecordingDriver::new().with_pipe_output("$ git describe\nv2.14-3-gdeadbee\n");
    let (code, driver, _) = run_script(&script, driver, "", &["probe", "use"]).await;
    assert_eq!(code, 0);
    assert_eq!(
        driver.shell_lines(),
        ["git describe", "echo 2.14 ${PATCH}"]
    );
    assert!(driver
        .calls()
        .contains(&DriverCall::SetEnv("MINOR".into(), "14".into())));
}

#[tokio::test]
async fn abort_code_is_returned_from_nested_branch() {
    let script = parse_script(
        "DEFINES:\n  ok: \"no\"\ncheck:\n  CMDS:\n    - DECIDE:\n        KEY: ok\n        \"no\":\n          ABORT: 4\n    - SHELL: unreachable\nlater:\n  CMDS:\n    - SHELL: unreachable\n",
        ScriptFormat::Yaml,
    )
    .unwrap();
    let (code, driver, _) = run_script(&script, RecordingDriver::new(), "", &["check", "later"]).await;
    assert_eq!(code, 4);
    assert!(driver.shell_lines().is_empty());
}

#[cfg(feature = "fuzz-tests")]
mod properties {
    use super::*;
    use muxseq::script::Keyword;
    use proptest::prelude::*;

    /// Payload for each keyword whose handler leaves a driver trace or no trace.
    fn entry(keyword: Keyword) -> &'static str {
        match keyword {
            Keyword::Session => "SESSION: s",
            Keyword::Window => "WINDOW: w",
            Keyword::Pane => "PANE: 1",
            Keyword::Split => "SPLIT:",
            Keyword::Delay => "DELAY: 0",
            Keyword::Echo => "ECHO: e",
            Keyword::Shell => "SHELL: x",
            Keyword::Capture => "CAPTURE:",
            _ => "ECHO: e",
        }
    }

    fn call_keyword(call: &DriverCall) -> Keyword {
        match call {
            DriverCall::Session(_) => Keyword::Session,
            DriverCall::Window(..) => Keyword::Window,
            DriverCall::SelectPane(_) => Keyword::Pane,
            DriverCall::Split(..) => Keyword::Split,
            DriverCall::Shell(..) => Keyword::Shell,
            DriverCall::Capture(..) => Keyword::Capture,
            other => panic!("unexpected call {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn driver_calls_follow_dispatch_order(
            keys in Just(vec![
                Keyword::Capture,
                Keyword::Shell,
                Keyword::Split,
                Keyword::Pane,
                Keyword::Window,
                Keyword::Session,
            ]).prop_shuffle()
        ) {
            let mut text = String::from("seq:\n  CMDS:\n    - ");
            let lines: Vec<&str> = keys.iter().map(|k| entry(*k)).collect();
            text.push_str(&lines.join("\n      "));
            text.push('\n');
            let script = parse_script(&text, ScriptFormat::Yaml).unwrap();
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let (_, driver, _) = runtime.block_on(run_script(&script, RecordingDriver::new(), "", &["seq"]));
            let fired: Vec<Keyword> = driver.calls().iter().map(call_keyword).collect();
            let mut sorted = fired.clone();
            sorted.sort();
            prop_assert_eq!(fired, sorted);
        }
    }
}
