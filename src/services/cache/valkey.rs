use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use std::time::Duration;

use crate::services::cache::client::{CacheClient, CacheError, CacheResult};

/// Valkey/Redis cache shared by every replica.
#[derive(Clone)]
pub struct ValkeyClient {
    // reconnects on its own; cloned per command
    manager: ConnectionManager,
}

impl std::fmt::Debug for ValkeyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ValkeyClient")
    }
}

fn command_failed(e: redis::RedisError) -> CacheError {
    CacheError::BackendCommand(e.to_string())
}

impl ValkeyClient {
    /// Connect and PING once so a bad `REDIS_URL` fails at startup.
    pub async fn new(url: &str) -> Result<Self, CacheError> {
        let connect_failed = |e: redis::RedisError| CacheError::BackendConnection(e.to_string());

        let manager = redis::Client::open(url)
            .map_err(connect_failed)?
            .get_connection_manager()
            .await
            .map_err(connect_failed)?;

        let mut conn = manager.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(connect_failed)?;

        Ok(Self { manager })
    }
}

#[async_trait]
impl CacheClient for ValkeyClient {
    fn backend_name(&self) -> &'static str {
        "valkey"
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.manager.clone();
        conn.exists(key).await.map_err(command_failed)
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.manager.clone();
        // SET key value EX <secs>
        conn.set_ex(key, value, ttl.as_secs().max(1))
            .await
            .map_err(command_failed)
    }
}
