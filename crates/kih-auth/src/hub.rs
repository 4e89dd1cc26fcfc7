//! Process-wide authentication state.
//!
//! The hub starts in [`AuthState::Resolving`] and is moved to `SignedIn` or
//! `SignedOut` once the stored session has been checked. Consumers read
//! cloned snapshots or subscribe to changes; nothing outside this crate holds
//! tokens.

use std::sync::OnceLock;

use kih_core::identity::UserSnapshot;
use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "user", rename_all = "snake_case")]
pub enum AuthState {
    /// Stored credentials have not been checked yet.
    Resolving,
    SignedOut,
    SignedIn(UserSnapshot),
}

impl AuthState {
    #[must_use]
    pub const fn user(&self) -> Option<&UserSnapshot> {
        match self {
            Self::SignedIn(user) => Some(user),
            Self::Resolving | Self::SignedOut => None,
        }
    }

    #[must_use]
    pub const fn is_resolving(&self) -> bool {
        matches!(self, Self::Resolving)
    }
}

/// Publish/subscribe holder of the current [`AuthState`].
#[derive(Debug)]
pub struct SessionHub {
    tx: watch::Sender<AuthState>,
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHub {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthState::Resolving);
        Self { tx }
    }

    /// The hub shared by the whole process.
    pub fn global() -> &'static Self {
        static HUB: OnceLock<SessionHub> = OnceLock::new();
        HUB.get_or_init(Self::new)
    }

    pub fn publish_signed_in(&self, user: UserSnapshot) {
        tracing::debug!(uid = %user.uid, "auth state: signed in");
        self.tx.send_replace(AuthState::SignedIn(user));
    }

    pub fn publish_signed_out(&self) {
        tracing::debug!("auth state: signed out");
        self.tx.send_replace(AuthState::SignedOut);
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserSnapshot> {
        self.tx.borrow().user().cloned()
    }

    /// True until the first sign-in or sign-out is published.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.tx.borrow().is_resolving()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    /// Wait until the state is no longer `Resolving`.
    pub async fn resolved(&self) -> AuthState {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.is_resolving()).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        }
    }
}
