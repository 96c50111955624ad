//! DECIDE: branch on a variable's current value.

use std::slice;

use tracing::debug;

use crate::driver::TerminalDriver;
use crate::script::{Action, DecideSpec, Keyword, Script};

use super::env::Environment;
use super::{Confirm, Context, Engine, Flow};

/// How a DECIDE step resolves against the current environment.
#[derive(Debug)]
pub enum Decision<'s> {
    /// The step has no `KEY` entry.
    MissingKey,
    /// `KEY` names a variable that is not bound.
    Unbound(&'s str),
    /// The value names a sequence. Reported only; control does not move.
    Sequence(String),
    /// The value selects a branch.
    Branch(String, &'s [Action]),
    /// No branch matches; nothing happens.
    NoMatch(String),
}

pub fn resolve_decision<'s>(
    spec: &'s DecideSpec,
    env: &Environment,
    script: &Script,
) -> Decision<'s> {
    let Some(key) = spec.key.as_deref() else {
        return Decision::MissingKey;
    };
    let Some(value) = env.get(key) else {
        return Decision::Unbound(key);
    };
    if script.contains(value) {
        return Decision::Sequence(value.to_string());
    }
    match spec.branch(value) {
        Some(actions) => Decision::Branch(value.to_string(), actions),
        None => Decision::NoMatch(value.to_string()),
    }
}

impl<'a, D: TerminalDriver> Engine<'a, D> {
    /// Branch actions are confirmed the same way as the step that holds them.
    pub(super) async fn decide(
        &mut self,
        spec: &DecideSpec,
        ctx: &mut Context,
        confirm: Confirm,
    ) -> Flow {
        let actions = match resolve_decision(spec, &self.env, self.script) {
            Decision::MissingKey => {
                self.sink.error("DECIDE without KEY");
                return Flow::Continue;
            }
            Decision::Unbound(key) => {
                self.sink
                    .error(&format!("DECIDE: variable `{key}` is not set"));
                return Flow::Continue;
            }
            Decision::Sequence(name) => {
                self.sink.decision(&format!("Selected sequence {name}"));
                return Flow::Continue;
            }
            Decision::NoMatch(value) => {
                debug!(value = value.as_str(), "no DECIDE branch");
                return Flow::Continue;
            }
            Decision::Branch(value, actions) => {
                self.sink.decision(&format!("Selected branch {value}"));
                actions
            }
        };

        for action in actions {
            let flow = match action {
                Action::Dispatch(dict) => self.dispatch(dict, ctx, confirm).await,
                Action::Shell(line) => {
                    if confirm != Confirm::Never {
                        self.confirm_step(Keyword::Shell, line);
                    }
                    self.send_shell(ctx, slice::from_ref(line)).await;
                    Flow::Continue
                }
            };
            if !flow.is_continue() {
                return flow;
            }
        }
        Flow::Continue
    }
}
