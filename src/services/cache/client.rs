//! Key/TTL cache seam behind the token revocation list.
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub type CacheResult<T> = Result<T, CacheError>;

/// Failures talking to the cache backend.
///
/// Kept apart from `AppError`: the revocation check turns any of these into a
/// rejected token, while logout turns them into a 500.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    BackendConnection(String),
    #[error("cache command error: {0}")]
    BackendCommand(String),
}

/// Marker-style cache: a key is either present (until its TTL lapses) or not.
///
/// Clones share the same underlying store.
#[async_trait]
pub trait CacheClient: Clone + Send + Sync + 'static {
    /// Short backend label for startup logs.
    fn backend_name(&self) -> &'static str;

    async fn exists(&self, key: &str) -> CacheResult<bool>;

    /// Insert or overwrite `key`. Sub-second TTLs are rounded up to one second.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;
}
