//! In-memory test doubles for the outbound ports, shared by the unit tests
//! and the workspace integration suite.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::commands::BootstrapCommand;
use crate::domain::errors::RegistryError;
use crate::domain::topology::{Peer, Topology};
use crate::ports::{
    CommandExecutor, EnvWiringError, EnvironmentWiring, ExecTarget, ExecutionError, RegistryStore,
};

/// Registry store backed by a plain map.
#[derive(Default)]
pub struct InMemoryRegistry {
    entries: Mutex<HashMap<String, String>>,
    fail_with: Option<String>,
}

impl InMemoryRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose every read fails, for unreachable-store scenarios.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail_with: Some(message.into()),
        }
    }

    /// Store an entry.
    pub fn insert(&self, name: impl Into<String>, address: impl Into<String>) {
        self.entries
            .lock()
            .unwrap()
            .insert(name.into(), address.into());
    }
}

#[async_trait]
impl RegistryStore for InMemoryRegistry {
    async fn get(&self, name: &str) -> Result<Option<String>, RegistryError> {
        if let Some(message) = &self.fail_with {
            return Err(RegistryError::Store(message.clone()));
        }
        Ok(self.entries.lock().unwrap().get(name).cloned())
    }

    async fn get_all(&self) -> Result<HashMap<String, String>, RegistryError> {
        if let Some(message) = &self.fail_with {
            return Err(RegistryError::Store(message.clone()));
        }
        Ok(self.entries.lock().unwrap().clone())
    }
}

/// Environment wiring double that records which nodes it was asked to wire.
#[derive(Default)]
pub struct RecordingEnvWiring {
    wired: Mutex<Vec<String>>,
    fail_with: Option<String>,
}

impl RecordingEnvWiring {
    /// Wiring that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wiring that always fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            wired: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    /// Node names wired so far, in call order.
    pub fn wired(&self) -> Vec<String> {
        self.wired.lock().unwrap().clone()
    }
}

#[async_trait]
impl EnvironmentWiring for RecordingEnvWiring {
    async fn setup_env_var_connections(
        &self,
        peer: &Peer,
        _topology: &Topology,
    ) -> Result<(), EnvWiringError> {
        if let Some(message) = &self.fail_with {
            return Err(EnvWiringError::new(message.clone()));
        }
        self.wired.lock().unwrap().push(peer.node_name.clone());
        Ok(())
    }
}

/// Command executor double that records dispatched commands and replays
/// scripted responses in order. Once the script runs dry it answers with
/// empty output.
#[derive(Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<(ExecTarget, BootstrapCommand)>>,
    responses: Mutex<VecDeque<Result<String, ExecutionError>>>,
}

impl RecordingExecutor {
    /// Executor with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn respond_with(&self, output: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(output.into()));
    }

    /// Queue a failure.
    pub fn fail_with(&self, target: impl Into<String>, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ExecutionError::new(target, message)));
    }

    /// Commands dispatched so far, in call order.
    pub fn calls(&self) -> Vec<(ExecTarget, BootstrapCommand)> {
        self.calls.lock().unwrap().clone()
    }

    /// Names of dispatched commands, in call order.
    pub fn command_names(&self) -> Vec<&'static str> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, cmd)| cmd.name())
            .collect()
    }
}

#[async_trait]
impl CommandExecutor for RecordingExecutor {
    async fn execute(
        &self,
        target: &ExecTarget,
        command: &BootstrapCommand,
    ) -> Result<String, ExecutionError> {
        self.calls
            .lock()
            .unwrap()
            .push((target.clone(), command.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}
