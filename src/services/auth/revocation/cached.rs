use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use crate::services::{
    auth::revocation::store::{RevocationError, RevocationStore},
    cache::CacheClient,
};

/// Revocation list on top of any `CacheClient` (Valkey in production,
/// in-process memory otherwise).
#[derive(Clone)]
pub struct CacheRevocationStore<C: CacheClient> {
    cache: Arc<C>,
    // Key prefix to avoid collisions with other cache users
    prefix: String,
}

impl<C: CacheClient> CacheRevocationStore<C> {
    pub fn new(cache: Arc<C>) -> Self {
        Self::new_with_prefix(cache, "blacklist")
    }

    pub fn new_with_prefix(cache: Arc<C>, prefix: impl Into<String>) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, raw: &str) -> String {
        format!("{}:{}", self.prefix, raw)
    }
}

impl<C: CacheClient> RevocationStore for CacheRevocationStore<C> {
    fn revoke<'a>(
        &'a self,
        fingerprint: &'a str,
        ttl_secs: u64,
    ) -> Pin<Box<dyn Future<Output = Result<(), RevocationError>> + Send + 'a>> {
        Box::pin(async move {
            let key = self.key(fingerprint);
            self.cache
                .set_with_ttl(&key, "1", Duration::from_secs(ttl_secs))
                .await?;
            Ok(())
        })
    }

    fn is_revoked<'a>(
        &'a self,
        fingerprint: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, RevocationError>> + Send + 'a>> {
        Box::pin(async move {
            let key = self.key(fingerprint);
            Ok(self.cache.exists(&key).await?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cache::{CacheClient, MemoryCache};

    #[test]
    fn keys_are_prefixed() {
        let store = CacheRevocationStore::new(Arc::new(MemoryCache::new()));
        assert_eq!(store.key("jti123"), "blacklist:jti123");
    }

    #[tokio::test]
    async fn revoked_fingerprints_are_reported() {
        let cache = Arc::new(MemoryCache::new());
        let store = CacheRevocationStore::new(cache.clone());

        assert!(!store.is_revoked("revokedjti").await.unwrap());
        store.revoke("revokedjti", 123).await.unwrap();
        assert!(store.is_revoked("revokedjti").await.unwrap());
        assert!(!store.is_revoked("notrevoked").await.unwrap());

        assert!(cache.exists("blacklist:revokedjti").await.unwrap());
    }
}
