//! Session persistence.
//!
//! Sessions are stored as JSON in the OS keyring, with a `0600` file under
//! `~/.kih/` when no keyring is available. `KIH_AUTH__SESSION` can supply a
//! session for headless use.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;
use crate::session::AuthSession;

const DEFAULT_KEYRING_SERVICE: &str = "kih-cli";
const KEYRING_USER: &str = "session";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const SESSION_ENV: &str = "KIH_AUTH__SESSION";

/// Where a loaded session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    File,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

/// Keyring service name; `KIH_KEYRING_SERVICE` overrides it so tests do not
/// touch real credentials.
fn keyring_service() -> String {
    std::env::var("KIH_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

fn keyring_entry() -> Option<keyring::Entry> {
    keyring::Entry::new(&keyring_service(), KEYRING_USER)
        .inspect_err(|error| tracing::debug!(%error, "keyring unavailable"))
        .ok()
}

fn parse(raw: &str) -> Option<AuthSession> {
    if raw.trim().is_empty() {
        return None;
    }
    serde_json::from_str(raw)
        .inspect_err(|error| tracing::warn!(%error, "ignoring unreadable stored session"))
        .ok()
}

/// Persist a session. Falls back to the credentials file if the keyring
/// rejects it.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if both keyring and file storage fail.
pub fn store(session: &AuthSession) -> Result<(), AuthError> {
    let json = serde_json::to_string(session)
        .map_err(|e| AuthError::TokenStoreError(format!("serialize session: {e}")))?;
    match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        Ok(entry) => match entry.set_password(&json) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                store_file_at(&credentials_path()?, &json)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "keyring unavailable; falling back to file");
            store_file_at(&credentials_path()?, &json)
        }
    }
}

/// Load a session with its source. Priority: keyring, `KIH_AUTH__SESSION`,
/// then `~/.kih/credentials`.
#[must_use]
pub fn load_with_source() -> Option<(AuthSession, TokenSource)> {
    if let Some(entry) = keyring_entry() {
        if let Ok(raw) = entry.get_password() {
            if let Some(session) = parse(&raw) {
                return Some((session, TokenSource::Keyring));
            }
        }
    }

    if let Ok(raw) = std::env::var(SESSION_ENV) {
        if let Some(session) = parse(&raw) {
            return Some((session, TokenSource::Env));
        }
    }

    let path = credentials_path().ok()?;
    load_file_at(&path).map(|session| (session, TokenSource::File))
}

#[must_use]
pub fn load() -> Option<AuthSession> {
    load_with_source().map(|(session, _)| session)
}

/// Delete stored credentials from keyring and file.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn delete() -> Result<(), AuthError> {
    if let Some(entry) = keyring_entry() {
        // A missing entry is fine.
        let _ = entry.delete_credential();
    }
    delete_file_at(&credentials_path()?)
}

// --- Private file helpers ---

fn credentials_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".kih").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found, cannot store credentials".into())
        })
}

fn store_file_at(path: &Path, json: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, json)
        .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStoreError(format!("chmod {}: {e}", path.display())))?;
    }
    Ok(())
}

fn load_file_at(path: &Path) -> Option<AuthSession> {
    fs::read_to_string(path).ok().as_deref().and_then(parse)
}

fn delete_file_at(path: &Path) -> Result<(), AuthError> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| {
            AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kih_core::identity::UserSnapshot;
    use pretty_assertions::assert_eq;

    fn session() -> AuthSession {
        AuthSession::from_tokens(
            "id.token.sig".into(),
            "refresh".into(),
            "3600",
            UserSnapshot {
                uid: "uid-siti".into(),
                email: Some("siti@example.com".into()),
                display_name: Some("Siti".into()),
                photo_url: None,
            },
        )
    }

    #[test]
    fn file_store_load_delete_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join(".kih").join("credentials");
        let json = serde_json::to_string(&session()).unwrap();

        store_file_at(&path, &json).unwrap();
        assert_eq!(load_file_at(&path), Some(session()));

        delete_file_at(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_file_at(&path), None);
    }

    #[cfg(unix)]
    #[test]
    fn credentials_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join(".kih").join("credentials");
        store_file_at(&path, "{}").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        let dir_mode = fs::metadata(path.parent().unwrap())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(dir_mode & 0o777, 0o700);
    }

    #[test]
    fn blank_or_garbage_file_is_ignored() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials");

        fs::write(&path, "   \n  ").unwrap();
        assert_eq!(load_file_at(&path), None);

        fs::write(&path, "not json").unwrap();
        assert_eq!(load_file_at(&path), None);
    }

    #[test]
    fn deleting_missing_file_is_ok() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        assert!(delete_file_at(&tmp.path().join("nope")).is_ok());
    }
}
