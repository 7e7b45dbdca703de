use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use crate::services::cache::client::{CacheClient, CacheError, CacheResult};

/// In-process cache used when no Valkey URL is configured.
///
/// Expired entries are dropped on lookup and swept on every insert, so keys
/// that are never read again do not accumulate. State is lost on restart and
/// is not shared across replicas.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, (String, Instant)>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> CacheError {
    CacheError::BackendCommand("memory cache lock poisoned".to_string())
}

#[async_trait]
impl CacheClient for MemoryCache {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        match entries.get(key) {
            Some((_, expires_at)) if *expires_at > Instant::now() => Ok(true),
            Some(_) => {
                entries.remove(key);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let now = Instant::now();
        let expires_at = now + ttl.max(Duration::from_secs(1));

        let mut entries = self.entries.lock().map_err(poisoned)?;
        entries.retain(|_, (_, exp)| *exp > now);
        entries.insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }
}
