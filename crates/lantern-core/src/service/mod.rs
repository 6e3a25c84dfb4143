//! Service layer: the configuration orchestrator wiring the topology domain
//! to the environment-wiring and command-execution ports.

mod orchestrator;


pub use orchestrator::{ConfigurationOrchestrator, OrchestrationResult, OrchestrationStatus};
