use chrono::{DateTime, TimeDelta, Utc};
use kih_core::identity::UserSnapshot;
use serde::{Deserialize, Serialize};

/// Refresh tokens this close to expiry before using them.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

/// A signed-in session as persisted by the token store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserSnapshot,
}

impl AuthSession {
    /// Build a session from a provider token response. `expires_in` is in
    /// seconds and arrives as a string.
    #[must_use]
    pub fn from_tokens(
        id_token: String,
        refresh_token: String,
        expires_in: &str,
        user: UserSnapshot,
    ) -> Self {
        let secs = expires_in.trim().parse::<i64>().unwrap_or(0);
        Self {
            id_token,
            refresh_token,
            expires_at: Utc::now() + TimeDelta::seconds(secs),
            user,
        }
    }

    /// True if the id token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        self.expires_at <= Utc::now() + TimeDelta::seconds(buffer_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserSnapshot {
        UserSnapshot {
            uid: "uid-siti".into(),
            email: Some("siti@example.com".into()),
            display_name: Some("Siti".into()),
            photo_url: None,
        }
    }

    #[test]
    fn fresh_session_is_not_near_expiry() {
        let session = AuthSession::from_tokens("id".into(), "refresh".into(), "3600", user());
        assert!(!session.is_near_expiry(EXPIRY_BUFFER_SECS));
    }

    #[test]
    fn session_inside_buffer_is_near_expiry() {
        let session = AuthSession::from_tokens("id".into(), "refresh".into(), "30", user());
        assert!(session.is_near_expiry(EXPIRY_BUFFER_SECS));
    }

    #[test]
    fn unparseable_expiry_counts_as_expired() {
        let session = AuthSession::from_tokens("id".into(), "refresh".into(), "soon", user());
        assert!(session.is_near_expiry(0));
    }

    #[test]
    fn serializes_user_in_camel_case() {
        let session = AuthSession::from_tokens("id".into(), "refresh".into(), "3600", user());
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["user"]["displayName"], "Siti");
        let back: AuthSession = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
    }
}
