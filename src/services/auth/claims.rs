//! Decoded token payloads and the canonical user they normalize into.
//!
//! A verified token can carry one of three payload shapes:
//! - a full profile mapping (has `username`)
//! - a minimal mapping with only a subject (has `sub`)
//! - a bare identifier (a JSON string holding a UUID)
//!
//! `TokenClaims::try_from(Value)` classifies the payload; `CanonicalUser::from`
//! fills in whatever the shape does not carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::resolver::Unauthorized;

/// Fully normalized identity used by the rest of the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CanonicalUser {
    /// Placeholder profile for tokens that only identify a subject.
    pub fn placeholder(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: "unknown".to_string(),
            email: "unknown@example.com".to_string(),
            first_name: "Unknown".to_string(),
            last_name: "User".to_string(),
            is_active: true,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenClaims {
    Profile(Box<CanonicalUser>),
    Subject(Uuid),
    Identifier(Uuid),
}

impl TryFrom<Value> for TokenClaims {
    type Error = Unauthorized;

    // `username` wins over `sub` when both are present.
    fn try_from(payload: Value) -> Result<Self, Self::Error> {
        match payload {
            Value::Object(map) if map.contains_key("username") => {
                let user: CanonicalUser =
                    serde_json::from_value(Value::Object(map)).map_err(|_| Unauthorized)?;
                Ok(Self::Profile(Box::new(user)))
            }
            Value::Object(map) => {
                let sub = map.get("sub").ok_or(Unauthorized)?;
                Ok(Self::Subject(parse_uuid(sub)?))
            }
            Value::String(id) => Uuid::parse_str(&id)
                .map(Self::Identifier)
                .map_err(|_| Unauthorized),
            _ => Err(Unauthorized),
        }
    }
}

fn parse_uuid(value: &Value) -> Result<Uuid, Unauthorized> {
    value
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or(Unauthorized)
}

impl From<TokenClaims> for CanonicalUser {
    fn from(claims: TokenClaims) -> Self {
        match claims {
            TokenClaims::Profile(user) => *user,
            TokenClaims::Subject(id) | TokenClaims::Identifier(id) => Self::placeholder(id),
        }
    }
}
