//! Redis-backed registry store.
//!
//! Every operation is wrapped in its own deadline; a silent store maps to
//! [`RegistryError::Timeout`] instead of hanging the caller. An absent key
//! is `Ok(None)`.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use crate::domain::errors::RegistryError;
use crate::ports::RegistryStore;

/// Default bound on a single registry operation.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(30);

/// Registry client over a Redis instance.
pub struct RedisRegistry {
    client: redis::Client,
    op_timeout: Duration,
}

impl RedisRegistry {
    /// Open a client for the given URL (e.g. `redis://lantern-redis:6379`).
    ///
    /// Connections are established lazily per operation; an unreachable
    /// store surfaces on the first read, not here.
    pub fn open(url: &str) -> Result<Self, RegistryError> {
        let client = redis::Client::open(url).map_err(|e| RegistryError::Store(e.to_string()))?;
        Ok(Self {
            client,
            op_timeout: DEFAULT_OP_TIMEOUT,
        })
    }

    /// Override the per-operation deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.op_timeout = timeout;
        self
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T, RegistryError>
    where
        F: Future<Output = Result<T, redis::RedisError>>,
    {
        match tokio::time::timeout(self.op_timeout, operation).await {
            Ok(result) => result.map_err(|e| RegistryError::Store(e.to_string())),
            Err(_) => Err(RegistryError::Timeout {
                seconds: self.op_timeout.as_secs(),
            }),
        }
    }
}

#[async_trait]
impl RegistryStore for RedisRegistry {
    async fn get(&self, name: &str) -> Result<Option<String>, RegistryError> {
        self.bounded(async {
            let mut con = self.client.get_multiplexed_async_connection().await?;
            con.get::<_, Option<String>>(name).await
        })
        .await
    }

    async fn get_all(&self) -> Result<HashMap<String, String>, RegistryError> {
        self.bounded(async {
            let mut con = self.client.get_multiplexed_async_connection().await?;
            let keys: Vec<String> = con.keys("*").await?;
            let mut entries = HashMap::with_capacity(keys.len());
            for key in keys {
                // A key may expire between KEYS and GET; skip it quietly.
                if let Some(value) = con.get::<_, Option<String>>(&key).await? {
                    entries.insert(key, value);
                }
            }
            Ok(entries)
        })
        .await
    }
}
