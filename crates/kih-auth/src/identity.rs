//! Identity provider REST client.
//!
//! Covers the account endpoints the portal needs: password sign-in and
//! sign-up, display name update, password reset mail, federated sign-in, and
//! refresh of an expiring id token.

use std::time::Duration;

use kih_config::AuthConfig;
use kih_core::identity::UserSnapshot;
use serde::Deserialize;
use serde_json::json;

use crate::error::AuthError;
use crate::session::AuthSession;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Response of the `accounts:*` endpoints that return tokens.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<String>,
}

impl AccountResponse {
    fn snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            uid: self.local_id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone().filter(|n| !n.is_empty()),
            photo_url: self.photo_url.clone().filter(|u| !u.is_empty()),
        }
    }

    fn into_session(self) -> Result<AuthSession, AuthError> {
        let user = self.snapshot();
        let (Some(id_token), Some(refresh_token)) = (self.id_token, self.refresh_token) else {
            return Err(AuthError::Provider("response carried no tokens".into()));
        };
        let expires_in = self.expires_in.unwrap_or_else(|| "3600".into());
        Ok(AuthSession::from_tokens(id_token, refresh_token, &expires_in, user))
    }
}

/// Response of the secure-token refresh endpoint (snake case).
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

/// Map a non-success response to an [`AuthError`] using the provider's
/// error message when the body carries one.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) if !envelope.error.message.is_empty() => {
            Err(AuthError::from_provider_message(&envelope.error.message))
        }
        _ => Err(AuthError::Provider(format!("HTTP {status}: {body}"))),
    }
}

/// Client for the identity provider's account endpoints.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    api_key: String,
    identity_url: String,
    token_url: String,
}

impl IdentityClient {
    /// # Errors
    ///
    /// Returns [`AuthError::NotConfigured`] without an API key, or
    /// [`AuthError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        if !config.is_configured() {
            return Err(AuthError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("kih/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            identity_url: config.identity_url.trim_end_matches('/').to_string(),
            token_url: config.token_url.trim_end_matches('/').to_string(),
        })
    }

    fn account_url(&self, method: &str) -> String {
        format!("{}/accounts:{method}", self.identity_url)
    }

    async fn post_account(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, AuthError> {
        let resp = self
            .http
            .post(self.account_url(method))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;
        check_response(resp).await.inspect_err(|e| {
            tracing::debug!(method, error = %e, "identity request failed");
        })
    }

    /// Email and password sign-in.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] for unknown emails or wrong
    /// passwords, other variants for provider and network failures.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let resp = self
            .post_account(
                "signInWithPassword",
                json!({ "email": email, "password": password, "returnSecureToken": true }),
            )
            .await?;
        let account: AccountResponse = resp.json().await?;
        tracing::info!(uid = %account.local_id, "signed in with password");
        account.into_session()
    }

    /// Create an account, then set its display name when one is given.
    ///
    /// # Errors
    ///
    /// [`AuthError::EmailExists`], [`AuthError::WeakPassword`], or
    /// [`AuthError::InvalidEmail`] for rejected registrations.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<AuthSession, AuthError> {
        let resp = self
            .post_account(
                "signUp",
                json!({ "email": email, "password": password, "returnSecureToken": true }),
            )
            .await?;
        let account: AccountResponse = resp.json().await?;
        tracing::info!(uid = %account.local_id, "account created");
        let session = account.into_session()?;

        match display_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => self.update_display_name(session, name).await,
            None => Ok(session),
        }
    }

    /// Set the display name on the account behind `session`.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the provider rejects the update.
    pub async fn update_display_name(
        &self,
        session: AuthSession,
        display_name: &str,
    ) -> Result<AuthSession, AuthError> {
        let resp = self
            .post_account(
                "update",
                json!({
                    "idToken": session.id_token,
                    "displayName": display_name,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        let account: AccountResponse = resp.json().await?;
        let user = account.snapshot();
        match (account.id_token, account.refresh_token) {
            (Some(id_token), Some(refresh_token)) => Ok(AuthSession::from_tokens(
                id_token,
                refresh_token,
                account.expires_in.as_deref().unwrap_or("3600"),
                user,
            )),
            _ => Ok(AuthSession { user, ..session }),
        }
    }

    /// Send a password reset mail. The provider answers the same way for
    /// unknown addresses on projects with enumeration protection.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`] for malformed addresses, other
    /// variants for provider and network failures.
    pub async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.post_account(
            "sendOobCode",
            json!({ "requestType": "PASSWORD_RESET", "email": email }),
        )
        .await?;
        tracing::info!("password reset mail requested");
        Ok(())
    }

    /// Exchange a federated id token (for example from Google) for a session.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the provider rejects the credential.
    pub async fn sign_in_with_idp(
        &self,
        provider_id: &str,
        provider_id_token: &str,
        request_uri: &str,
    ) -> Result<AuthSession, AuthError> {
        let post_body = format!(
            "id_token={}&providerId={}",
            urlencoding::encode(provider_id_token),
            urlencoding::encode(provider_id)
        );
        let resp = self
            .post_account(
                "signInWithIdp",
                json!({
                    "postBody": post_body,
                    "requestUri": request_uri,
                    "returnSecureToken": true,
                    "returnIdpCredential": true,
                }),
            )
            .await?;
        let account: AccountResponse = resp.json().await?;
        tracing::info!(uid = %account.local_id, provider_id, "signed in with identity provider");
        account.into_session()
    }

    /// Trade the refresh token for a new id token. The user snapshot is
    /// re-read from the new token when it decodes, else kept.
    ///
    /// # Errors
    ///
    /// [`AuthError::TokenExpired`] when the refresh token was revoked.
    pub async fn refresh(&self, session: &AuthSession) -> Result<AuthSession, AuthError> {
        let resp = self
            .http
            .post(format!("{}/token", self.token_url))
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", session.refresh_token.as_str()),
            ])
            .send()
            .await?;
        let refreshed: RefreshResponse = check_response(resp).await?.json().await?;
        let user = crate::claims::decode(&refreshed.id_token)
            .map(|claims| claims.to_snapshot())
            .unwrap_or_else(|_| session.user.clone());
        tracing::debug!(uid = %user.uid, "id token refreshed");
        Ok(AuthSession::from_tokens(
            refreshed.id_token,
            refreshed.refresh_token,
            &refreshed.expires_in,
            user,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_requires_api_key() {
        let err = IdentityClient::new(&AuthConfig::default()).unwrap_err();
        assert!(matches!(err, AuthError::NotConfigured));
    }

    #[test]
    fn account_url_joins_method() {
        let config = AuthConfig {
            api_key: "key".into(),
            identity_url: "http://127.0.0.1:9099/v1/".into(),
            ..AuthConfig::default()
        };
        let client = IdentityClient::new(&config).unwrap();
        assert_eq!(
            client.account_url("signUp"),
            "http://127.0.0.1:9099/v1/accounts:signUp"
        );
    }

    #[test]
    fn account_without_tokens_is_provider_error() {
        let account: AccountResponse =
            serde_json::from_str(r#"{"localId":"u1","email":"a@b.c"}"#).unwrap();
        assert!(matches!(account.into_session(), Err(AuthError::Provider(_))));
    }

    #[test]
    fn empty_display_name_becomes_none() {
        let account: AccountResponse = serde_json::from_str(
            r#"{"localId":"u1","displayName":"","photoUrl":"","idToken":"a","refreshToken":"b","expiresIn":"3600"}"#,
        )
        .unwrap();
        let session = account.into_session().unwrap();
        assert_eq!(session.user.display_name, None);
        assert_eq!(session.user.author_name(), "Anonim");
    }
}
