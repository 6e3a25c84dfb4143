//! Adapters layer: concrete implementations of the outbound ports.

pub mod process;
pub mod redis;
pub mod wiring;

pub use process::LocalProcessExecutor;
pub use redis::RedisRegistry;
pub use wiring::DisabledEnvWiring;
