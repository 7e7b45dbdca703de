use std::sync::Arc;

use tracing::warn;

use crate::services::auth::{
    claims::CanonicalUser,
    resolver::{TokenVerifier, Unauthorized, resolve},
    revocation::{RevocationError, RevocationStore, token_fingerprint},
};

/// Entry-point for middleware: bearer token → canonical user.
#[derive(Clone)]
pub struct AuthService {
    verifier: Arc<dyn TokenVerifier>,
    revocations: Arc<dyn RevocationStore>,
    revocation_ttl_seconds: u64,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("revocation_ttl_seconds", &self.revocation_ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(
        verifier: Arc<dyn TokenVerifier>,
        revocations: Arc<dyn RevocationStore>,
        revocation_ttl_seconds: u64,
    ) -> Self {
        Self {
            verifier,
            revocations,
            revocation_ttl_seconds,
        }
    }

    /// Resolve the token, then reject it if it was revoked.
    ///
    /// A revocation backend failure is treated as revoked (fail-closed).
    pub async fn authenticate(&self, token: &str) -> Result<CanonicalUser, Unauthorized> {
        let user = resolve(self.verifier.as_ref(), token)?;

        match self.revocations.is_revoked(&token_fingerprint(token)).await {
            Ok(false) => Ok(user),
            Ok(true) => {
                warn!(user_id = %user.id, "revoked token presented");
                Err(Unauthorized)
            }
            Err(err) => {
                warn!(error = ?err, "revocation backend failure");
                Err(Unauthorized)
            }
        }
    }

    pub async fn revoke(&self, token: &str) -> Result<(), RevocationError> {
        self.revocations
            .revoke(&token_fingerprint(token), self.revocation_ttl_seconds)
            .await
    }
}
