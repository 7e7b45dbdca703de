/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use tracing::{error, info};

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::{
    AuthService,
    access_jwt::AccessJwt,
    revocation::{CacheRevocationStore, RevocationStore},
};
use crate::services::cache::{CacheClient, MemoryCache, ValkeyClient};

pub async fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, AppError> {
    let jwt = AccessJwt::new(
        &config.jwt_secret_key,
        config.jwt_algorithm,
        config.auth_issuer.as_deref(),
        config.auth_audience.as_deref(),
        config.access_token_leeway_seconds,
    );

    let revocations: Arc<dyn RevocationStore> = match config.redis_url.as_deref() {
        Some(url) => {
            let client = ValkeyClient::new(url).await.map_err(|e| {
                error!(error = %e, "failed to connect revocation cache");
                AppError::Internal
            })?;
            info!(backend = client.backend_name(), "token revocation store ready");
            Arc::new(CacheRevocationStore::new(Arc::new(client)))
        }
        None => {
            let cache = MemoryCache::new();
            info!(
                backend = cache.backend_name(),
                "REDIS_URL not set; revocations are kept in-process"
            );
            Arc::new(CacheRevocationStore::new(Arc::new(cache)))
        }
    };

    Ok(Arc::new(AuthService::new(
        Arc::new(jwt),
        revocations,
        config.token_revocation_ttl_seconds,
    )))
}
