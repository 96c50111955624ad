//! Run loop and the list/kill entry points.

use tracing::info;

use crate::driver::TerminalDriver;
use crate::engine::{Engine, Flow};
use crate::error::RunError;
use crate::script::Script;
use crate::ui::RenderSink;

/// Run `names` in order, following redirections. Returns the process exit
/// status: 0, or the code of the first ABORT.
pub async fn run<D: TerminalDriver>(
    engine: &mut Engine<'_, D>,
    names: &[String],
) -> Result<i32, RunError> {
    let script = engine.script();
    if let Some(unknown) = names.iter().find(|name| !script.contains(name)) {
        return Err(RunError::UnknownSequence(unknown.clone()));
    }
    engine.publish_defines().await;

    for name in names {
        let mut next = name.clone();
        loop {
            match engine.run_sequence(&next).await {
                Flow::Continue => break,
                Flow::Redirect(target) => {
                    info!(from = next.as_str(), to = target.as_str(), "redirect");
                    next = target;
                }
                Flow::Abort(code) => return Ok(code),
            }
        }
    }
    Ok(0)
}

/// Kill every window declared by a layout.
pub async fn kill<D: TerminalDriver>(engine: &mut Engine<'_, D>) {
    engine.kill_windows().await;
}

/// Without a known `name`, list the sequence names; with one, print that
/// sequence as YAML.
pub fn list(script: &Script, name: Option<&str>, sink: &dyn RenderSink) -> Result<(), RunError> {
    match name.and_then(|name| script.sequence(name)) {
        Some(sequence) => {
            let text = serde_yaml::to_string(sequence.source())
                .map_err(crate::error::ScriptError::from)?;
            sink.plain(text.trim_end());
        }
        None => {
            for name in script.sequence_names() {
                sink.plain(name);
            }
        }
    }
    Ok(())
}
