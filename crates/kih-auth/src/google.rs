//! Google sign-in through a loopback browser flow.
//!
//! 1. Start `tiny_http` on `127.0.0.1:0`
//! 2. Open the consent page with a state nonce and a PKCE verifier
//! 3. Wait for `/callback?code=..&state=..` (in `spawn_blocking`)
//! 4. Exchange the code for a Google id token
//! 5. Trade that id token for a portal session via `accounts:signInWithIdp`

use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::error::AuthError;
use crate::identity::IdentityClient;
use crate::session::AuthSession;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const PROVIDER_ID: &str = "google.com";

/// OAuth client registered for the installed app.
#[derive(Debug, Clone)]
pub struct GoogleClient {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    id_token: String,
}

/// Hex string from `len` random bytes.
fn random_hex(len: usize) -> Result<String, AuthError> {
    let mut bytes = vec![0u8; len];
    getrandom::fill(&mut bytes)
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to generate nonce: {e}")))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

fn authorize_url(client_id: &str, redirect_uri: &str, state: &str, verifier: &str) -> String {
    format!(
        "{AUTHORIZE_URL}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={state}&code_challenge={verifier}&code_challenge_method=plain&prompt=select_account",
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode("openid email profile"),
    )
}

/// Run the whole Google sign-in and return the portal session.
///
/// # Errors
///
/// Returns `AuthError::BrowserFlowFailed` if the server cannot bind, the user
/// denies consent, the state does not match, or the callback times out.
/// Provider rejections surface as their mapped variants.
pub async fn sign_in(
    identity: &IdentityClient,
    google: &GoogleClient,
    timeout: Duration,
) -> Result<AuthSession, AuthError> {
    let server = tiny_http::Server::http("127.0.0.1:0")
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to bind: {e}")))?;
    let port = server
        .server_addr()
        .to_ip()
        .map(|a| a.port())
        .ok_or_else(|| AuthError::BrowserFlowFailed("no port".into()))?;

    let state = random_hex(16)?;
    let verifier = random_hex(32)?;
    let redirect_uri = format!("http://127.0.0.1:{port}/callback");
    let url = authorize_url(&google.client_id, &redirect_uri, &state, &verifier);

    eprintln!("Opening browser to: {url}");
    if let Err(error) = open::that(&url) {
        eprintln!("Failed to open browser: {error}");
        eprintln!("Open the URL above manually, then return here.");
    }

    let code = tokio::task::spawn_blocking(move || wait_for_callback(&server, timeout, &state))
        .await
        .map_err(|e| AuthError::BrowserFlowFailed(format!("spawn_blocking join: {e}")))??;

    let google_id_token = exchange_code(google, &code, &redirect_uri, &verifier).await?;
    identity
        .sign_in_with_idp(PROVIDER_ID, &google_id_token, &redirect_uri)
        .await
}

async fn exchange_code(
    google: &GoogleClient,
    code: &str,
    redirect_uri: &str,
    verifier: &str,
) -> Result<String, AuthError> {
    let resp = reqwest::Client::new()
        .post(TOKEN_URL)
        .form(&[
            ("code", code),
            ("client_id", google.client_id.as_str()),
            ("client_secret", google.client_secret.as_str()),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
            ("code_verifier", verifier),
        ])
        .send()
        .await?;
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::BrowserFlowFailed(format!(
            "code exchange failed (HTTP {status}): {body}"
        )));
    }
    let tokens: TokenResponse = resp.json().await?;
    Ok(tokens.id_token)
}

// ---------------------------------------------------------------------------
// Callback handling
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum Callback {
    /// Not our callback (favicon, preflight). Keep waiting.
    Ignore,
    Code(String),
    Denied(String),
    StateMismatch,
    Malformed(String),
}

fn parse_callback(url: &str, expected_state: &str) -> Callback {
    let Some(query) = url.strip_prefix("/callback?") else {
        return Callback::Ignore;
    };

    let mut code = None;
    let mut state = None;
    let mut error = None;
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = match urlencoding::decode(value) {
            Ok(v) => v.into_owned(),
            Err(e) => return Callback::Malformed(format!("URL decode: {e}")),
        };
        match key {
            "code" => code = Some(value),
            "state" => state = Some(value),
            "error" => error = Some(value),
            _ => {}
        }
    }

    if state.as_deref() != Some(expected_state) {
        return Callback::StateMismatch;
    }
    if let Some(error) = error {
        return Callback::Denied(error);
    }
    code.filter(|c| !c.is_empty())
        .map_or_else(|| Callback::Malformed("no code in callback".into()), Callback::Code)
}

fn html(body: &str) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let page = format!("<html><body>{body}</body></html>");
    let response = tiny_http::Response::from_string(page);
    match tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

/// Block until the callback server receives the authorization code.
fn wait_for_callback(
    server: &tiny_http::Server,
    timeout: Duration,
    expected_state: &str,
) -> Result<String, AuthError> {
    let deadline = Instant::now() + timeout;
    let timed_out = || {
        AuthError::BrowserFlowFailed(format!(
            "browser callback timed out after {}s",
            timeout.as_secs()
        ))
    };

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(timed_out());
        }
        let request = match server.recv_timeout(remaining) {
            Ok(Some(req)) => req,
            Ok(None) => return Err(timed_out()),
            Err(e) => return Err(AuthError::BrowserFlowFailed(format!("recv error: {e}"))),
        };

        let (page, result) = match parse_callback(request.url(), expected_state) {
            Callback::Ignore => {
                let _ = request.respond(tiny_http::Response::from_string("").with_status_code(204));
                continue;
            }
            Callback::Code(code) => (
                "<h1>Signed in!</h1><p>You can close this tab.</p>",
                Ok(code),
            ),
            Callback::Denied(reason) => (
                "<h1>Sign-in cancelled</h1><p>Check CLI output.</p>",
                Err(AuthError::BrowserFlowFailed(format!("consent denied: {reason}"))),
            ),
            Callback::StateMismatch => (
                "<h1>Sign-in failed</h1><p>State mismatch. Check CLI output.</p>",
                Err(AuthError::BrowserFlowFailed("state mismatch, possible CSRF".into())),
            ),
            Callback::Malformed(reason) => (
                "<h1>Sign-in failed</h1><p>Check CLI output.</p>",
                Err(AuthError::BrowserFlowFailed(reason)),
            ),
        };
        let _ = request.respond(html(page));
        return result;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn non_callback_paths_are_ignored() {
        assert_eq!(parse_callback("/favicon.ico", "s"), Callback::Ignore);
        assert_eq!(parse_callback("/callback", "s"), Callback::Ignore);
    }

    #[test]
    fn code_with_matching_state() {
        assert_eq!(
            parse_callback("/callback?state=abc&code=4%2F0Ab", "abc"),
            Callback::Code("4/0Ab".into())
        );
    }

    #[test]
    fn state_is_checked_before_anything_else() {
        assert_eq!(
            parse_callback("/callback?state=evil&code=x", "abc"),
            Callback::StateMismatch
        );
        assert_eq!(parse_callback("/callback?code=x", "abc"), Callback::StateMismatch);
    }

    #[test]
    fn denied_consent() {
        assert_eq!(
            parse_callback("/callback?state=abc&error=access_denied", "abc"),
            Callback::Denied("access_denied".into())
        );
    }

    #[test]
    fn authorize_url_carries_pkce_and_state() {
        let url = authorize_url("cid", "http://127.0.0.1:5000/callback", "st", "ver");
        assert!(url.starts_with(AUTHORIZE_URL));
        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A5000%2Fcallback"));
        assert!(url.contains("state=st"));
        assert!(url.contains("code_challenge=ver&code_challenge_method=plain"));
        assert!(url.contains("scope=openid%20email%20profile"));
    }

    #[test]
    fn random_hex_has_expected_length() {
        let a = random_hex(16).unwrap();
        assert_eq!(a.len(), 32);
        assert_ne!(a, random_hex(16).unwrap());
    }

    #[tokio::test]
    async fn wait_for_callback_skips_noise_then_returns_code() {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let waiter = tokio::task::spawn_blocking(move || {
            wait_for_callback(&server, Duration::from_secs(10), "nonce")
        });

        let http = reqwest::Client::new();
        let favicon = http
            .get(format!("http://127.0.0.1:{port}/favicon.ico"))
            .send()
            .await
            .unwrap();
        assert_eq!(favicon.status().as_u16(), 204);

        let page = http
            .get(format!("http://127.0.0.1:{port}/callback?code=abc&state=nonce"))
            .send()
            .await
            .unwrap();
        assert!(page.text().await.unwrap().contains("Signed in"));

        assert_eq!(waiter.await.unwrap().unwrap(), "abc");
    }

    #[test]
    fn wait_for_callback_times_out() {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let err = wait_for_callback(&server, Duration::from_millis(50), "nonce").unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
