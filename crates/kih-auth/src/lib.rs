//! # kih-auth
//!
//! Sign-in for the Kampung Inggris Digital Hub.
//!
//! Talks to the identity provider's REST endpoints (`reqwest`), runs the
//! Google loopback browser flow (`tiny_http` + `open`), keeps the session in
//! the OS keychain (`keyring`), and publishes the signed-in user through a
//! process-wide [`SessionHub`].

pub mod claims;
pub mod error;
pub mod google;
pub mod hub;
pub mod identity;
pub mod session;
pub mod token_store;

pub use error::AuthError;
pub use hub::{AuthState, SessionHub};
pub use identity::IdentityClient;
pub use session::AuthSession;

use session::EXPIRY_BUFFER_SECS;

/// Check stored credentials and publish the outcome on `hub`.
///
/// A session close to expiry is refreshed when `identity` is available and
/// stored again. A revoked refresh token clears the stored session. The hub
/// always leaves `Resolving`, even on error.
///
/// # Errors
///
/// Returns `AuthError` if the refresh request fails for reasons other than
/// an expired session, or the refreshed session cannot be stored.
pub async fn resolve_session(
    identity: Option<&IdentityClient>,
    hub: &SessionHub,
) -> Result<Option<AuthSession>, AuthError> {
    let Some(session) = token_store::load() else {
        hub.publish_signed_out();
        return Ok(None);
    };

    if !session.is_near_expiry(EXPIRY_BUFFER_SECS) {
        hub.publish_signed_in(session.user.clone());
        return Ok(Some(session));
    }

    let Some(identity) = identity else {
        tracing::warn!(
            expires_at = %session.expires_at,
            "stored session expired and auth is not configured; sign in again",
        );
        hub.publish_signed_out();
        return Ok(None);
    };

    match identity.refresh(&session).await {
        Ok(refreshed) => {
            token_store::store(&refreshed)?;
            hub.publish_signed_in(refreshed.user.clone());
            Ok(Some(refreshed))
        }
        Err(AuthError::TokenExpired) => {
            tracing::info!("stored session was revoked; clearing it");
            token_store::delete()?;
            hub.publish_signed_out();
            Ok(None)
        }
        Err(error) => {
            hub.publish_signed_out();
            Err(error)
        }
    }
}

/// Persist a fresh session and publish the user.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the session cannot be stored.
pub fn complete_sign_in(session: &AuthSession, hub: &SessionHub) -> Result<(), AuthError> {
    token_store::store(session)?;
    hub.publish_signed_in(session.user.clone());
    Ok(())
}

/// Clear stored credentials and publish `SignedOut`.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn sign_out(hub: &SessionHub) -> Result<(), AuthError> {
    token_store::delete()?;
    hub.publish_signed_out();
    Ok(())
}
