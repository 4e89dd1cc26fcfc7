use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not signed in, run `kih auth login`")]
    NotAuthenticated,

    #[error("session expired, run `kih auth login` again")]
    TokenExpired,

    #[error("email or password is incorrect")]
    InvalidCredentials,

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("an account with this email already exists")]
    EmailExists,

    #[error("password is too weak: {0}")]
    WeakPassword(String),

    #[error("this account has been disabled")]
    UserDisabled,

    #[error("too many attempts, try again later")]
    TooManyAttempts,

    #[error("browser sign-in failed: {0}")]
    BrowserFlowFailed(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("keyring error: {0}")]
    KeyringError(String),

    #[error("malformed id token: {0}")]
    MalformedToken(String),

    #[error("identity provider error: {0}")]
    Provider(String),

    #[error("identity provider unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("auth is not configured: set KIH_AUTH__API_KEY")]
    NotConfigured,
}

impl AuthError {
    /// Map an identity provider error message to a variant.
    ///
    /// Messages look like `EMAIL_EXISTS` or
    /// `WEAK_PASSWORD : Password should be at least 6 characters`.
    #[must_use]
    pub fn from_provider_message(message: &str) -> Self {
        let (code, detail) = match message.split_once(" : ") {
            Some((code, detail)) => (code.trim(), detail.trim()),
            None => (message.trim(), ""),
        };
        match code {
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
                Self::InvalidCredentials
            }
            "INVALID_EMAIL" | "MISSING_EMAIL" => Self::InvalidEmail,
            "EMAIL_EXISTS" => Self::EmailExists,
            "WEAK_PASSWORD" => Self::WeakPassword(if detail.is_empty() {
                "password should be at least 6 characters".into()
            } else {
                detail.to_string()
            }),
            "USER_DISABLED" => Self::UserDisabled,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::TooManyAttempts,
            "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" | "INVALID_ID_TOKEN" => {
                Self::TokenExpired
            }
            _ => Self::Provider(message.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_credential_codes() {
        for code in ["EMAIL_NOT_FOUND", "INVALID_PASSWORD", "INVALID_LOGIN_CREDENTIALS"] {
            assert!(matches!(
                AuthError::from_provider_message(code),
                AuthError::InvalidCredentials
            ));
        }
    }

    #[test]
    fn weak_password_keeps_detail() {
        let err = AuthError::from_provider_message(
            "WEAK_PASSWORD : Password should be at least 6 characters",
        );
        match err {
            AuthError::WeakPassword(detail) => {
                assert_eq!(detail, "Password should be at least 6 characters");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn unknown_code_is_provider_error() {
        let err = AuthError::from_provider_message("OPERATION_NOT_ALLOWED");
        assert_eq!(err.to_string(), "identity provider error: OPERATION_NOT_ALLOWED");
    }
}
