//! tmux transport: each driver call becomes one or more `tmux` invocations.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::error::DriverError;

use super::process::{ensure_success, run_process, shell_quote, ExecOutput};
use super::{PaneTarget, TerminalDriver};

/// Paste buffer used for CAPTURE.
pub const CAPTURE_BUFFER: &str = "muxseq-capture";

/// Drives a tmux server through its command-line client.
#[derive(Debug, Clone)]
pub struct TmuxDriver {
    binary: String,
    dry_run: bool,
    inside_tmux: bool,
}

impl TmuxDriver {
    /// `dry_run` makes SHELL lines echo instead of execute.
    pub fn new(binary: impl Into<String>, dry_run: bool) -> Self {
        Self {
            binary: binary.into(),
            dry_run,
            inside_tmux: std::env::var_os("TMUX").is_some(),
        }
    }

    async fn tmux(&self, args: Vec<String>) -> Result<ExecOutput, DriverError> {
        debug!(command = %args.join(" "), "tmux");
        run_process(&self.binary, &args).await
    }

    async fn tmux_ok(&self, args: Vec<String>) -> Result<ExecOutput, DriverError> {
        let context = args.first().cloned().unwrap_or_default();
        ensure_success(self.tmux(args).await?, &context)
    }
}

/// `-t <target>` when the target names anything; empty means tmux's current.
fn target_args(target: &PaneTarget) -> Vec<String> {
    if target.is_empty() {
        Vec::new()
    } else {
        vec!["-t".into(), target.to_string()]
    }
}

fn args<const N: usize>(head: [&str; N]) -> Vec<String> {
    head.iter().map(|arg| arg.to_string()).collect()
}

/// Window target for window-level commands, `session:window` or `window`.
fn window_target(session: Option<&str>, name: &str) -> String {
    match session {
        Some(session) => format!("{session}:{name}"),
        None => name.to_string(),
    }
}

/// Literal text for one SHELL line; dry runs type an `echo` of it instead.
pub(crate) fn shell_keys(line: &str, dry_run: bool) -> String {
    if dry_run {
        format!("echo {}", shell_quote(line))
    } else {
        line.to_string()
    }
}

pub(crate) fn send_literal_args(target: &PaneTarget, text: &str) -> Vec<String> {
    let mut out = args(["send-keys", "-l"]);
    out.extend(target_args(target));
    out.push(text.to_string());
    out
}

pub(crate) fn send_enter_args(target: &PaneTarget) -> Vec<String> {
    let mut out = args(["send-keys"]);
    out.extend(target_args(target));
    out.push("Enter".into());
    out
}

pub(crate) fn split_args(target: &PaneTarget, options: Option<&str>) -> Vec<String> {
    let mut out = args(["split-window"]);
    out.extend(target_args(target));
    if let Some(options) = options {
        out.extend(options.split_whitespace().map(str::to_string));
    }
    out
}

pub(crate) fn pipe_args(target: &PaneTarget, sink: &Path) -> Vec<String> {
    let mut out = args(["pipe-pane", "-o"]);
    out.extend(target_args(target));
    out.push(format!("cat > {}", shell_quote(&sink.display().to_string())));
    out
}

#[async_trait]
impl TerminalDriver for TmuxDriver {
    async fn select_or_create_session(&mut self, name: &str) -> Result<(), DriverError> {
        let exists = self
            .tmux(args(["has-session", "-t", name]))
            .await?
            .success();
        if !exists {
            debug!(session = name, "creating session");
            self.tmux_ok(args(["new-session", "-d", "-s", name])).await?;
        }
        if self.inside_tmux {
            self.tmux_ok(args(["switch-client", "-t", name])).await?;
        }
        Ok(())
    }

    async fn select_or_create_window(
        &mut self,
        session: Option<&str>,
        name: &str,
    ) -> Result<(), DriverError> {
        let target = window_target(session, name);
        if self
            .tmux(args(["select-window", "-t", target.as_str()]))
            .await?
            .success()
        {
            return Ok(());
        }
        debug!(window = name, "creating window");
        let mut create = args(["new-window", "-n", name]);
        if let Some(session) = session {
            create.push("-t".into());
            create.push(format!("{session}:"));
        }
        self.tmux_ok(create).await?;
        Ok(())
    }

    async fn select_pane(&mut self, target: &PaneTarget) -> Result<(), DriverError> {
        let mut cmd = args(["select-pane"]);
        cmd.extend(target_args(target));
        self.tmux_ok(cmd).await?;
        Ok(())
    }

    async fn split(
        &mut self,
        target: &PaneTarget,
        options: Option<&str>,
    ) -> Result<(), DriverError> {
        self.tmux_ok(split_args(target, options)).await?;
        Ok(())
    }

    async fn send_shell(&mut self, target: &PaneTarget, line: &str) -> Result<(), DriverError> {
        let keys = shell_keys(line, self.dry_run);
        self.tmux_ok(send_literal_args(target, &keys)).await?;
        self.tmux_ok(send_enter_args(target)).await?;
        Ok(())
    }

    async fn capture_buffer(
        &mut self,
        target: &PaneTarget,
        file: Option<&Path>,
    ) -> Result<Option<String>, DriverError> {
        let mut capture = args(["capture-pane", "-J"]);
        capture.extend(target_args(target));
        capture.extend(args(["-b", CAPTURE_BUFFER]));
        self.tmux_ok(capture).await?;

        let text = match file {
            Some(file) => {
                let path = file.display().to_string();
                self.tmux_ok(args(["save-buffer", "-a", "-b", CAPTURE_BUFFER, path.as_str()]))
                    .await?;
                None
            }
            None => Some(
                self.tmux_ok(args(["show-buffer", "-b", CAPTURE_BUFFER]))
                    .await?
                    .stdout,
            ),
        };
        self.tmux_ok(args(["delete-buffer", "-b", CAPTURE_BUFFER]))
            .await?;
        Ok(text)
    }

    async fn pipe_to_sink(&mut self, target: &PaneTarget, sink: &Path) -> Result<(), DriverError> {
        self.tmux_ok(pipe_args(target, sink)).await?;
        Ok(())
    }

    async fn stop_pipe(&mut self, target: &PaneTarget) -> Result<(), DriverError> {
        let mut cmd = args(["pipe-pane"]);
        cmd.extend(target_args(target));
        self.tmux_ok(cmd).await?;
        Ok(())
    }

    async fn set_environment(&mut self, key: &str, value: &str) -> Result<(), DriverError> {
        self.tmux_ok(args(["set-environment", key, value])).await?;
        Ok(())
    }

    async fn kill_window(
        &mut self,
        session: Option<&str>,
        name: &str,
    ) -> Result<(), DriverError> {
        let target = window_target(session, name);
        self.tmux_ok(args(["kill-window", "-t", target.as_str()])).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane(session: Option<&str>, window: &str, pane: &str) -> PaneTarget {
        PaneTarget {
            session: session.map(str::to_string),
            window: Some(window.into()),
            pane: Some(pane.into()),
        }
    }

    #[test]
    fn send_keys_are_literal_then_enter() {
        let target = pane(Some("work"), "build", "2");
        assert_eq!(
            send_literal_args(&target, "make -j8"),
            ["send-keys", "-l", "-t", "work:build.2", "make -j8"]
        );
        assert_eq!(
            send_enter_args(&target),
            ["send-keys", "-t", "work:build.2", "Enter"]
        );
    }

    #[test]
    fn empty_target_omits_flag() {
        assert_eq!(
            send_enter_args(&PaneTarget::default()),
            ["send-keys", "Enter"]
        );
    }

    #[test]
    fn dry_run_echoes_quoted_line() {
        assert_eq!(shell_keys("rm -rf build", false), "rm -rf build");
        assert_eq!(shell_keys("echo 'hi'", true), "echo 'echo '\\''hi'\\'''");
    }

    #[test]
    fn split_passes_options_through() {
        let target = pane(None, "build", "1").window_only();
        assert_eq!(
            split_args(&target, Some("-h -p 30")),
            ["split-window", "-t", "build", "-h", "-p", "30"]
        );
        assert_eq!(split_args(&target, None), ["split-window", "-t", "build"]);
    }

    #[test]
    fn pipe_quotes_sink_path() {
        let target = pane(None, "build", "1");
        assert_eq!(
            pipe_args(&target, Path::new("/tmp/muxseq sink")),
            ["pipe-pane", "-o", "-t", "build.1", "cat > '/tmp/muxseq sink'"]
        );
    }

    #[test]
    fn window_target_prefixes_session() {
        assert_eq!(window_target(Some("work"), "build"), "work:build");
        assert_eq!(window_target(None, "build"), "build");
    }
}
