use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::Value;
use tracing::debug;

use super::resolver::TokenVerifier;

/// HMAC access-token verifier.
///
/// Tokens are issued by the authorization server with a shared secret; here we
/// only check them. `jsonwebtoken::Validation` covers:
/// - signature
/// - `exp` (with leeway)
/// - `iss` / `aud` when configured
///
/// On top of that, a `type` claim (when present) must be `"access"` so that a
/// refresh token cannot be presented as a bearer token.
#[derive(Clone)]
pub struct AccessJwt {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AccessJwt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AccessJwt")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AccessJwt {
    pub fn new(
        secret: &str,
        algorithm: Algorithm,
        issuer: Option<&str>,
        audience: Option<&str>,
        leeway_seconds: u64,
    ) -> Self {
        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        if let Some(audience) = audience {
            validation.set_audience(&[audience]);
        }
        validation.leeway = leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    fn decode(&self, token: &str) -> Result<Value, jsonwebtoken::errors::Error> {
        let data = jsonwebtoken::decode::<Value>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

impl TokenVerifier for AccessJwt {
    fn verify_token(&self, token: &str) -> Option<Value> {
        let claims = match self.decode(token) {
            Ok(claims) => claims,
            Err(err) => {
                debug!(error = %err, "access token rejected");
                return None;
            }
        };

        match claims.get("type").and_then(Value::as_str) {
            Some(kind) if kind != "access" => {
                debug!(token_type = kind, "non-access token presented as bearer");
                None
            }
            _ => Some(claims),
        }
    }
}
