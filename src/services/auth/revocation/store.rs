use std::{future::Future, pin::Pin};

use crate::services::cache::CacheError;

/// Revoked-token lookup.
///
/// Keys are token fingerprints (see `token_fingerprint`), never raw tokens.
/// Any `Err` must be treated as "revoked" by callers (fail-closed).
pub trait RevocationStore: Send + Sync {
    // Mark `fingerprint` as revoked for `ttl_secs`.
    fn revoke<'a>(
        &'a self,
        fingerprint: &'a str,
        ttl_secs: u64,
    ) -> Pin<Box<dyn Future<Output = Result<(), RevocationError>> + Send + 'a>>;

    fn is_revoked<'a>(
        &'a self,
        fingerprint: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, RevocationError>> + Send + 'a>>;
}

#[derive(Debug, thiserror::Error)]
pub enum RevocationError {
    #[error(transparent)]
    Cache(#[from] CacheError),
}
