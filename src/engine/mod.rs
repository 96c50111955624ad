//! Sequence execution engine.
//!
//! The engine runs one sequence at a time against a [`TerminalDriver`]. Each
//! command dictionary is walked in the fixed keyword order of
//! [`Keyword::DISPATCH_ORDER`]; handlers report problems through the render
//! sink and keep going, except for SEQUENCE and ABORT which hand a [`Flow`]
//! back to the caller.

mod decide;
mod dispatch;
pub mod env;
mod extract;

use std::time::Duration;

use tracing::{debug, warn};

use crate::driver::{PaneTarget, TerminalDriver};
use crate::error::DriverError;
use crate::script::{Keyword, PaneDef, Script, Sequence};
use crate::ui::input::step_prompt;
use crate::ui::{LineInput, RenderSink};

pub use decide::{resolve_decision, Decision};
pub use env::Environment;
pub use extract::match_bindings;

/// Default wait between sending an EXTRACT command and reading its output.
pub const DEFAULT_EXTRACT_SETTLE: Duration = Duration::from_secs(1);

/// What the caller should do after a dispatch pass or a sequence run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Run the named sequence next.
    Redirect(String),
    /// Stop the whole run with this exit code.
    Abort(i32),
}

impl Flow {
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// Per-run engine options.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Session used when a sequence does not name its own.
    pub default_session: Option<String>,
    /// Ask for confirmation before handlers fire.
    pub interactive: bool,
    pub extract_settle: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            default_session: None,
            interactive: false,
            extract_settle: DEFAULT_EXTRACT_SETTLE,
        }
    }
}

/// Which handlers ask for confirmation in interactive mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Confirm {
    Never,
    BeforeShell,
    EveryKeyword,
}

/// Transient state of one sequence invocation.
#[derive(Debug, Clone, Default)]
pub(crate) struct Context {
    /// Shown in unknown-keyword warnings.
    pub(crate) title: String,
    pub(crate) session: Option<String>,
    pub(crate) window: Option<String>,
    pub(crate) pane: Option<String>,
    /// Applied before each line of the next SHELL dispatch, then cleared.
    pub(crate) delay: Option<Duration>,
}

impl Context {
    pub(crate) fn target(&self) -> PaneTarget {
        PaneTarget {
            session: self.session.clone(),
            window: self.window.clone(),
            pane: self.pane.clone(),
        }
    }
}

/// Runs sequences of one script.
pub struct Engine<'a, D: TerminalDriver> {
    script: &'a Script,
    driver: D,
    sink: &'a dyn RenderSink,
    input: &'a mut dyn LineInput,
    env: Environment,
    options: EngineOptions,
}

impl<'a, D: TerminalDriver> Engine<'a, D> {
    /// The environment starts out holding the script's DEFINES.
    pub fn new(
        script: &'a Script,
        driver: D,
        sink: &'a dyn RenderSink,
        input: &'a mut dyn LineInput,
        options: EngineOptions,
    ) -> Self {
        let env = script.defines().iter().cloned().collect();
        Self {
            script,
            driver,
            sink,
            input,
            env,
            options,
        }
    }

    pub fn script(&self) -> &'a Script {
        self.script
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Mirror every DEFINES entry into the multiplexer environment.
    pub async fn publish_defines(&mut self) {
        for (key, value) in self.script.defines() {
            if let Err(err) = self.driver.set_environment(key, value).await {
                self.report(&format!("set-environment {key}"), err);
            }
        }
    }

    /// Kill every window declared by a NEW_WINDOW layout.
    pub async fn kill_windows(&mut self) {
        let session = self.options.default_session.clone();
        if let Some(session) = session.as_deref() {
            if let Err(err) = self.driver.select_or_create_session(session).await {
                self.report(&format!("session {session}"), err);
            }
        }
        let script = self.script;
        for window in script.pane_index().windows() {
            self.sink.activity(&format!("Killing window {window}"));
            if let Err(err) = self.driver.kill_window(session.as_deref(), window).await {
                self.report(&format!("kill-window {window}"), err);
            }
        }
    }

    /// Run one sequence to completion, or until it redirects or aborts.
    pub async fn run_sequence(&mut self, name: &str) -> Flow {
        let script = self.script;
        let Some(sequence) = script.sequence(name) else {
            self.sink.error(&format!("no sequence named `{name}`"));
            return Flow::Continue;
        };
        debug!(sequence = name, "running sequence");

        let title = match sequence.banner_title() {
            "" => sequence.name.clone(),
            title => title.to_string(),
        };
        self.sink
            .banner(sequence.banner_title(), sequence.desc.as_deref().unwrap_or_default());

        let mut ctx = Context {
            title,
            ..Context::default()
        };
        self.enter_session(sequence, &mut ctx).await;
        self.enter_window(sequence, &mut ctx).await;

        if let Some((_, panes)) = sequence.layout() {
            return self.run_panes(panes, &mut ctx).await;
        }
        if sequence.panes.is_some() {
            self.sink.warn(&format!(
                "sequence `{name}` declares NEW_PANES without NEW_WINDOW; panes skipped"
            ));
        }
        match &sequence.cmds {
            Some(cmds) => {
                let confirm = self.confirm_mode(Confirm::EveryKeyword);
                for dict in cmds {
                    let flow = self.dispatch(dict, &mut ctx, confirm).await;
                    if !flow.is_continue() {
                        return flow;
                    }
                }
                Flow::Continue
            }
            None => Flow::Continue,
        }
    }

    async fn enter_session(&mut self, sequence: &Sequence, ctx: &mut Context) {
        let session = sequence
            .session
            .clone()
            .or_else(|| self.options.default_session.clone());
        let Some(session) = session else {
            return;
        };
        if let Err(err) = self.driver.select_or_create_session(&session).await {
            self.report(&format!("session {session}"), err);
        }
        ctx.session = Some(session);
    }

    async fn enter_window(&mut self, sequence: &Sequence, ctx: &mut Context) {
        let Some(window) = sequence.new_window.as_deref().or(sequence.window.as_deref()) else {
            return;
        };
        self.sink.activity(&format!("window {window}"));
        if let Err(err) = self
            .driver
            .select_or_create_window(ctx.session.as_deref(), window)
            .await
        {
            self.report(&format!("window {window}"), err);
        }
        ctx.window = Some(window.to_string());
        ctx.pane = None;
    }

    /// Set up a declared window layout, one pane at a time.
    async fn run_panes(&mut self, panes: &'a [PaneDef], ctx: &mut Context) -> Flow {
        let confirm = self.confirm_mode(Confirm::BeforeShell);
        for (pane_cnt, pane) in panes.iter().enumerate() {
            self.sink.activity(&format!("pane {}", pane.name));
            if pane_cnt > 0 && !pane.commands.contains(Keyword::Split) {
                self.split(ctx, None).await;
            }
            ctx.pane = Some((pane_cnt + 1).to_string());
            let flow = self.dispatch(&pane.commands, ctx, confirm).await;
            if !flow.is_continue() {
                return flow;
            }
        }
        Flow::Continue
    }

    fn confirm_mode(&self, interactive: Confirm) -> Confirm {
        if self.options.interactive {
            interactive
        } else {
            Confirm::Never
        }
    }

    /// Wait for the user before `keyword` fires.
    fn confirm_step(&mut self, keyword: Keyword, payload: &str) {
        if let Err(err) = self
            .input
            .read_line(&step_prompt(keyword.as_str(), payload))
        {
            self.sink.warn(&format!("failed to read confirmation: {err}"));
        }
    }

    async fn split(&mut self, ctx: &Context, options: Option<&str>) {
        self.sink.activity("split");
        if let Err(err) = self
            .driver
            .split(&ctx.target().window_only(), options)
            .await
        {
            self.report("split-window", err);
        }
    }

    /// Send each line through substitution, honoring and then clearing DELAY.
    async fn send_shell(&mut self, ctx: &mut Context, lines: &[String]) {
        let target = ctx.target();
        for line in lines {
            if let Some(delay) = ctx.delay {
                tokio::time::sleep(delay).await;
            }
            let line = self.env.substitute(line);
            if let Err(err) = self.driver.send_shell(&target, &line).await {
                self.report(&format!("send-keys {target}"), err);
            }
        }
        ctx.delay = None;
    }

    /// Driver failures inside handlers are reported and execution continues.
    fn report(&self, action: &str, err: DriverError) {
        warn!(action, error = %err, "driver command failed");
        self.sink.warn(&format!("{action}: {err}"));
    }
}
