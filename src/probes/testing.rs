//! Scripted collaborators shared by probe tests

use crate::error::{AppError, Result};
use crate::process::{CommandOutput, CommandRunner};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

/// One recorded invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

/// Runner that returns a fixed result and records what it was asked to run
pub struct ScriptedRunner {
    result: Mutex<Option<Result<CommandOutput>>>,
    pub calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn succeeding(stdout: &str) -> Self {
        Self::with_result(Ok(CommandOutput::new(stdout)))
    }

    pub fn failing(error: AppError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<CommandOutput>) -> Self {
        Self {
            result: Mutex::new(Some(result)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        Some(PathBuf::from(format!("/usr/bin/{}", program)))
    }

    async fn run(&self, program: &str, args: &[String], timeout: Duration) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            timeout,
        });
        self.result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(AppError::internal("scripted runner called twice")))
    }
}

/// Runner that fails the test if anything is executed
pub struct PanickingRunner {
    pub installed: bool,
}

#[async_trait]
impl CommandRunner for PanickingRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.installed.then(|| PathBuf::from(format!("/usr/bin/{}", program)))
    }

    async fn run(&self, program: &str, _args: &[String], _timeout: Duration) -> Result<CommandOutput> {
        panic!("{} must not be executed", program);
    }
}
