//! Subprocess helpers for the tools that shell out (`dig`, `openssl`, `sslscan`)

use crate::utils::ExternalCommandError;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;

/// Output of a finished child process
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Render a program and its arguments the way a shell user would type them
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a program with stdin closed and capture its output.
///
/// The exit status is returned as-is; callers decide what a non-zero status
/// means. The child is killed if the timeout elapses.
pub async fn run_captured(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<CapturedOutput, ExternalCommandError> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ExternalCommandError::Spawn {
            program: program.to_string(),
            message: e.to_string(),
        })?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(CapturedOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }),
        Ok(Err(e)) => Err(ExternalCommandError::Spawn {
            program: program.to_string(),
            message: e.to_string(),
        }),
        Err(_) => Err(ExternalCommandError::Timeout {
            program: program.to_string(),
            timeout,
        }),
    }
}

/// Run a program attached to the current terminal
pub async fn run_inherited(program: &str, args: &[String]) -> Result<(), ExternalCommandError> {
    let status = Command::new(program)
        .args(args)
        .status()
        .await
        .map_err(|e| ExternalCommandError::Spawn {
            program: program.to_string(),
            message: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ExternalCommandError::Failed {
            program: program.to_string(),
            code: status.code(),
        })
    }
}
