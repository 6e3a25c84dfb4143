//! Local process command executor.
//!
//! Runs bootstrap commands as child processes on the host lantern itself
//! runs on. This is the executor used when lantern is deployed as a sidecar
//! sharing the node's mount namespace; dispatch into a remote container is a
//! separate capability provided by the host application.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::commands::BootstrapCommand;
use crate::ports::{CommandExecutor, ExecTarget, ExecutionError};

/// Executor spawning the rendered argv as a local child process.
#[derive(Debug, Default)]
pub struct LocalProcessExecutor;

impl LocalProcessExecutor {
    /// Create a new local executor.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for LocalProcessExecutor {
    async fn execute(
        &self,
        target: &ExecTarget,
        command: &BootstrapCommand,
    ) -> Result<String, ExecutionError> {
        let argv = command.to_argv();
        debug!(target = %target, command = command.name(), "spawning bootstrap command");

        let output = Command::new(&argv[0])
            .args(&argv[1..])
            .output()
            .await
            .map_err(|e| ExecutionError::new(target.to_string(), e.to_string()))?;

        if !output.status.success() {
            return Err(ExecutionError::new(
                target.to_string(),
                format!(
                    "{} exited with {}: {}",
                    command.name(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
