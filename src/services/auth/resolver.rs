//! Token → canonical user resolution, and the active-user gate.
//!
//! Every failure along the way (undecodable token, unknown payload shape,
//! incomplete profile) is reported as the single `Unauthorized` kind so
//! nothing about the decode path reaches the client.

use serde_json::Value;
use thiserror::Error;

use super::claims::{CanonicalUser, TokenClaims};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Could not validate credentials")]
pub struct Unauthorized;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Inactive user")]
pub struct InactiveUser;

/// Decodes a bearer token into its claims payload.
///
/// Returns `None` when the token cannot be decoded or verified.
pub trait TokenVerifier: Send + Sync {
    fn verify_token(&self, token: &str) -> Option<Value>;
}

pub fn resolve<V>(verifier: &V, token: &str) -> Result<CanonicalUser, Unauthorized>
where
    V: TokenVerifier + ?Sized,
{
    let payload = verifier.verify_token(token).ok_or(Unauthorized)?;
    normalize(payload)
}

pub(crate) fn normalize(payload: Value) -> Result<CanonicalUser, Unauthorized> {
    TokenClaims::try_from(payload).map(CanonicalUser::from)
}

pub fn ensure_active(user: CanonicalUser) -> Result<CanonicalUser, InactiveUser> {
    if !user.is_active {
        return Err(InactiveUser);
    }
    Ok(user)
}
