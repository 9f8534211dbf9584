//! External command execution with hard deadlines

use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Captured output of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new<S: Into<String>>(stdout: S) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Stdout followed by stderr, as a terminal would show them
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout.trim_end(), self.stderr)
        }
    }
}

/// Runs external diagnostic tools (`ping`, `whois`, `traceroute`)
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Full path of `program` on PATH, if installed
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run `program` to completion, killing it when `timeout` elapses.
    ///
    /// Errors: `Timeout` past the deadline, `MissingBinary` when the program
    /// cannot be spawned because it does not exist, `Process` on non-zero exit.
    async fn run(&self, program: &str, args: &[String], timeout: Duration) -> Result<CommandOutput>;
}

/// Runner backed by `tokio::process`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    async fn run(&self, program: &str, args: &[String], timeout: Duration) -> Result<CommandOutput> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AppError::missing_binary(program)
                } else {
                    AppError::process(format!("failed to start {}: {}", program, e))
                }
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(AppError::timeout(format!(
                    "{} did not finish within {:?}",
                    program, timeout
                )))
            }
        };

        let captured = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !output.status.success() {
            let status = match output.status.code() {
                Some(code) => format!("exit status {}", code),
                None => "terminated by signal".to_string(),
            };
            let detail = captured.stderr.trim();
            return Err(if detail.is_empty() {
                AppError::process(format!("{}: {}", program, status))
            } else {
                AppError::process(format!("{}: {} ({})", program, status, detail))
            });
        }

        Ok(captured)
    }
}
