//! External command execution.

use std::io::ErrorKind;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::HandoffError;

/// Exit status and captured output of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Turn a failed exit into a provisioning error for `step`.
    pub fn require_success(&self, step: &str) -> Result<(), HandoffError> {
        if self.success() {
            return Ok(());
        }
        let detail = if self.stderr.trim().is_empty() {
            self.stdout.trim()
        } else {
            self.stderr.trim()
        };
        Err(HandoffError::Provisioning {
            step: step.to_string(),
            message: match self.status {
                Some(code) => format!("exit status {code}: {detail}"),
                None => format!("terminated by signal: {detail}"),
            },
        })
    }
}

/// Runs a program to completion, optionally feeding it stdin.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<&str>,
    ) -> Result<CommandOutput, HandoffError>;
}

/// [`CommandRunner`] backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<&str>,
    ) -> Result<CommandOutput, HandoffError> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|error| match error.kind() {
            ErrorKind::NotFound => HandoffError::missing_command(
                program,
                "Please install it (for docker, see https://docs.docker.com/get-docker/).",
            ),
            _ => HandoffError::Io(error),
        })?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            pipe.write_all(input.as_bytes()).await?;
            pipe.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_success_prefers_stderr() {
        let output = CommandOutput {
            status: Some(125),
            stdout: "ignored".into(),
            stderr: "port is already allocated\n".into(),
        };
        let err = output.require_success("start").unwrap_err();
        assert!(matches!(
            err,
            HandoffError::Provisioning { step, message }
            if step == "start" && message == "exit status 125: port is already allocated"
        ));
    }

    #[tokio::test]
    async fn missing_program_is_missing_command() {
        let err = TokioCommandRunner
            .run("handoff-no-such-docker-5e2b", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, HandoffError::MissingCommand { command, .. } if command == "handoff-no-such-docker-5e2b"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stdin_is_piped_through() {
        let output = TokioCommandRunner
            .run("cat", &[], Some("CREATE DATABASE shop;"))
            .await
            .unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, "CREATE DATABASE shop;");
    }
}
