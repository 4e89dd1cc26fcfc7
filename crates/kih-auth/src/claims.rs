//! Unverified id token decoding.
//!
//! The provider already validated the token it handed us; these helpers only
//! read the payload to learn the expiry and the user behind a stored session.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use kih_core::identity::UserSnapshot;
use serde::Deserialize;

use crate::error::AuthError;

/// Fields of interest in an id token payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdTokenClaims {
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub exp: i64,
}

/// Payload as sent. Provider tokens carry the uid in both `user_id` and `sub`.
#[derive(Deserialize)]
struct RawClaims {
    user_id: Option<String>,
    sub: Option<String>,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
    exp: Option<i64>,
}

impl IdTokenClaims {
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    #[must_use]
    pub fn to_snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            uid: self.user_id.clone(),
            email: self.email.clone(),
            display_name: self.name.clone(),
            photo_url: self.picture.clone(),
        }
    }
}

fn payload(jwt: &str) -> Result<Vec<u8>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::MalformedToken("invalid JWT format".into()));
    }
    base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::MalformedToken(format!("base64 decode failed: {e}")))
}

/// Decode the payload without verifying the signature.
///
/// # Errors
///
/// Returns `AuthError::MalformedToken` if the token is not a three-part JWT
/// or the payload lacks `user_id`/`sub` or `exp`.
pub fn decode(jwt: &str) -> Result<IdTokenClaims, AuthError> {
    let raw: RawClaims = serde_json::from_slice(&payload(jwt)?)
        .map_err(|e| AuthError::MalformedToken(format!("JSON parse failed: {e}")))?;
    let user_id = raw
        .user_id
        .or(raw.sub)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AuthError::MalformedToken("missing user id claim".into()))?;
    let exp = raw
        .exp
        .ok_or_else(|| AuthError::MalformedToken("missing exp claim".into()))?;
    Ok(IdTokenClaims {
        user_id,
        email: raw.email,
        name: raw.name,
        picture: raw.picture,
        exp,
    })
}

/// Decode only the `exp` claim.
///
/// # Errors
///
/// Returns `AuthError::MalformedToken` for malformed tokens or a missing `exp`.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let value: serde_json::Value = serde_json::from_slice(&payload(jwt)?)
        .map_err(|e| AuthError::MalformedToken(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::MalformedToken("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::MalformedToken("invalid exp timestamp".into()))
}

#[cfg(test)]
pub(crate) fn fake_jwt(payload: &serde_json::Value) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let header = engine.encode(r#"{"alg":"RS256"}"#);
    let body = engine.encode(payload.to_string());
    let signature = engine.encode("fake_sig");
    format!("{header}.{body}.{signature}")
}
