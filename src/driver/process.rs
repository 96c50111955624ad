//! Child-process helpers shared by driver transports.

use std::process::Stdio;

use tokio::process::Command;

use crate::error::DriverError;

/// Exit status and captured streams of one child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Spawn and wait for a process.
pub async fn run_process(program: &str, args: &[String]) -> Result<ExecOutput, DriverError> {
    let mut cmd = Command::new(program);
    // Kill the child if its future is dropped.
    cmd.kill_on_drop(true);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let child = cmd
        .spawn()
        .map_err(|e| DriverError::Spawn(format!("{program}: {e}")))?;

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| DriverError::CommandFailed(format!("{program}: {e}")))?;

    Ok(ExecOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Convert non-zero command status into contextual driver errors.
pub fn ensure_success(output: ExecOutput, context: &str) -> Result<ExecOutput, DriverError> {
    if output.success() {
        return Ok(output);
    }

    let mut details = if output.stderr.trim().is_empty() {
        output.stdout.trim().to_string()
    } else {
        output.stderr.trim().to_string()
    };
    if details.is_empty() {
        details = format!("command exited with {}", output.exit_code);
    }

    Err(DriverError::CommandFailed(format!("{context}: {details}")))
}

/// Shell-safe single-quote escaping.
pub fn shell_quote(s: &str) -> String {
    if s.is_empty() {
        "''".into()
    } else {
        format!("'{}'", s.replace('\'', "'\\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(exit_code: i32, stdout: &str, stderr: &str) -> ExecOutput {
        ExecOutput {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    #[test]
    fn quote_empty() {
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn quote_with_single_quote() {
        assert_eq!(shell_quote("a'b"), "'a'\\''b'");
    }

    #[test]
    fn ensure_success_prefers_stderr_details() {
        let err = ensure_success(output(1, "out", "can't find window: x"), "select-window")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "command failed: select-window: can't find window: x"
        );
    }

    #[test]
    fn ensure_success_falls_back_to_exit_code() {
        let err = ensure_success(output(3, "  ", ""), "kill-window").unwrap_err();
        assert!(err.to_string().ends_with("command exited with 3"), "got: {err}");
        assert!(ensure_success(output(0, "", ""), "ok").is_ok());
    }

    #[tokio::test]
    async fn run_process_captures_stdout_and_exit_code() {
        let out = run_process("sh", &["-c".into(), "echo done; exit 4".into()])
            .await
            .unwrap();
        assert_eq!(out.exit_code, 4);
        assert_eq!(out.stdout, "done\n");
    }

    #[tokio::test]
    async fn run_process_reports_spawn_failure() {
        let err = run_process("/definitely/not/a/binary", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, DriverError::Spawn(_)));
    }
}
