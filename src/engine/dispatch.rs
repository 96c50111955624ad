//! Fixed-order keyword dispatch and the per-keyword handlers.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::driver::TerminalDriver;
use crate::script::{Command, CommandDict, Keyword, PaneRef, PromptSpec};

use super::{Confirm, Context, Engine, Flow};

/// Boxed so DECIDE branches can dispatch recursively.
pub(crate) type DispatchFuture<'b> = Pin<Box<dyn Future<Output = Flow> + 'b>>;

impl<'a, D: TerminalDriver> Engine<'a, D> {
    /// Run every keyword present in `dict`, in dispatch order, stopping at the
    /// first handler that does not continue.
    pub(crate) fn dispatch<'b>(
        &'b mut self,
        dict: &'b CommandDict,
        ctx: &'b mut Context,
        confirm: Confirm,
    ) -> DispatchFuture<'b> {
        Box::pin(async move {
            if !dict.unknown_keys().is_empty() {
                self.sink.warn(&format!(
                    "Unknown commands [{}] in sequence \"{}\"",
                    dict.unknown_keys().join(", "),
                    ctx.title
                ));
            }
            for keyword in Keyword::DISPATCH_ORDER {
                let Some(command) = dict.get(keyword) else {
                    continue;
                };
                let ask = match confirm {
                    Confirm::Never => false,
                    Confirm::BeforeShell => keyword == Keyword::Shell,
                    Confirm::EveryKeyword => true,
                };
                if ask {
                    self.confirm_step(keyword, dict.payload_text(keyword));
                }
                let flow = self.execute(command, ctx, confirm).await;
                if !flow.is_continue() {
                    return flow;
                }
            }
            Flow::Continue
        })
    }

    async fn execute(
        &mut self,
        command: &Command,
        ctx: &mut Context,
        confirm: Confirm,
    ) -> Flow {
        debug!(keyword = %command.keyword(), "dispatch");
        match command {
            Command::Session(name) => {
                self.sink.activity(&format!("session {name}"));
                if let Err(err) = self.driver.select_or_create_session(name).await {
                    self.report(&format!("session {name}"), err);
                }
                ctx.session = Some(name.clone());
            }
            Command::Window(name) => {
                self.sink.activity(&format!("window {name}"));
                if let Err(err) = self
                    .driver
                    .select_or_create_window(ctx.session.as_deref(), name)
                    .await
                {
                    self.report(&format!("window {name}"), err);
                }
                ctx.window = Some(name.clone());
                ctx.pane = None;
            }
            Command::Pane(pane) => self.select_pane(pane, ctx).await,
            Command::Split(options) => self.split(ctx, options.as_deref()).await,
            Command::Delay(delay) => ctx.delay = Some(*delay),
            Command::Echo(message) => self.sink.echo(message),
            Command::Sequence(target) => {
                if self.script.contains(target) {
                    self.sink.redirect(target);
                    return Flow::Redirect(target.clone());
                }
                self.sink.error(&format!("unknown sequence `{target}`"));
            }
            Command::Shell(lines) => self.send_shell(ctx, lines).await,
            Command::Extract(spec) => self.extract(spec, ctx).await,
            Command::Capture(file) => {
                match self
                    .driver
                    .capture_buffer(&ctx.target(), file.as_deref())
                    .await
                {
                    Ok(Some(text)) => self.sink.output_block(&text),
                    Ok(None) => {}
                    Err(err) => self.report("capture-pane", err),
                }
            }
            Command::Prompt(spec) => self.prompt(spec),
            Command::Decide(spec) => return self.decide(spec, ctx, confirm).await,
            Command::Pause(delay) => {
                self.sink
                    .activity(&format!("Waiting({:.1}s)...", delay.as_secs_f64()));
                tokio::time::sleep(*delay).await;
            }
            Command::Abort(code) => {
                self.sink.warn(&format!("aborting with exit code {code}"));
                return Flow::Abort(*code);
            }
        }
        Flow::Continue
    }

    async fn select_pane(&mut self, pane: &PaneRef, ctx: &mut Context) {
        let index = match pane {
            PaneRef::Index(index) => Some(*index),
            PaneRef::Name(name) => ctx
                .window
                .as_deref()
                .and_then(|window| self.script.pane_index().get(window, name))
                .or_else(|| name.trim().parse().ok()),
        };
        let Some(index) = index else {
            self.sink.error(&format!("unknown pane `{pane}`"));
            return;
        };
        self.sink.activity(&format!("pane {pane}"));
        ctx.pane = Some(index.to_string());
        if let Err(err) = self.driver.select_pane(&ctx.target()).await {
            self.report(&format!("select-pane {index}"), err);
        }
    }

    fn prompt(&mut self, spec: &PromptSpec) {
        match self.input.read_line(&spec.banner) {
            Ok(answer) => {
                if let Some(key) = &spec.key {
                    debug!(key = key.as_str(), "prompt bound");
                    self.env.set(key.clone(), answer);
                }
            }
            Err(err) => self.sink.error(&format!("failed to read input: {err}")),
        }
    }
}
