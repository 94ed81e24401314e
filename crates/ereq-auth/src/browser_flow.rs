use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::error::AuthError;
use crate::token_store::StoredToken;
use crate::{AUTHORIZE_URL, SCOPES, TOKEN_URL};

/// An installed-app OAuth client.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    pub client_id: String,
    /// Desktop clients carry a non-confidential secret; web clients using
    /// PKCE alone leave it unset.
    pub client_secret: Option<String>,
}

/// Execute the browser-based Google sign-in.
///
/// 1. Start `tiny_http` on `127.0.0.1:0` (random port)
/// 2. Open the browser at Google's consent page, redirecting to localhost
/// 3. Wait for the callback carrying the authorization code (in
///    `spawn_blocking`, since `tiny_http::recv` blocks)
/// 4. Exchange the code for an access token
/// 5. Store the token
///
/// # Errors
///
/// Returns `AuthError::BrowserFlowFailed` if the server cannot bind or the
/// callback times out, `AuthError::Provider` if Google reports an error,
/// and `AuthError::TokenExchange` if the code cannot be redeemed.
pub async fn login(
    client: &OAuthClient,
    timeout: std::time::Duration,
) -> Result<StoredToken, AuthError> {
    let server = tiny_http::Server::http("127.0.0.1:0")
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to bind: {e}")))?;
    let port = server
        .server_addr()
        .to_ip()
        .map(|a| a.port())
        .ok_or_else(|| AuthError::BrowserFlowFailed("no port".into()))?;

    let state = random_hex(16)?;
    let verifier = code_verifier()?;
    let redirect_uri = format!("http://127.0.0.1:{port}");
    let sign_in_url = authorize_url(&client.client_id, &redirect_uri, &state, &verifier);

    eprintln!("Opening browser to: {sign_in_url}");
    if let Err(error) = open::that(&sign_in_url) {
        eprintln!("Failed to open browser: {error}");
        eprintln!("Open the URL above manually, then return here.");
    }

    let code = tokio::task::spawn_blocking(move || wait_for_callback(&server, timeout, &state))
        .await
        .map_err(|e| AuthError::BrowserFlowFailed(format!("spawn_blocking join: {e}")))??;

    let token = exchange_code(client, &code, &verifier, &redirect_uri).await?;
    crate::token_store::store(&token)?;
    Ok(token)
}

/// Google's consent page URL for this client and loopback redirect.
#[must_use]
pub fn authorize_url(client_id: &str, redirect_uri: &str, state: &str, verifier: &str) -> String {
    let scope = SCOPES.join(" ");
    format!(
        "{AUTHORIZE_URL}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}\
         &code_challenge={}&code_challenge_method=plain&prompt=select_account",
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(&scope),
        urlencoding::encode(state),
        urlencoding::encode(verifier),
    )
}

/// What a single request to the loopback server means for the flow.
#[derive(Debug, PartialEq, Eq)]
enum Callback {
    /// Not the redirect (favicon, preflight, refresh); keep waiting.
    Ignore,
    Code(String),
    Denied {
        error: String,
        description: Option<String>,
    },
    StateMismatch,
}

/// Interpret a request URL received on the loopback server.
fn parse_callback(url: &str, expected_state: &str) -> Result<Callback, AuthError> {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    if path != "/" || query.is_empty() {
        return Ok(Callback::Ignore);
    }

    let mut code = None;
    let mut state = None;
    let mut error = None;
    let mut description = None;
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = urlencoding::decode(&value.replace('+', " "))
            .map_err(|e| AuthError::BrowserFlowFailed(format!("URL decode: {e}")))?
            .into_owned();
        match key {
            "code" => code = Some(value),
            "state" => state = Some(value),
            "error" => error = Some(value),
            "error_description" => description = Some(value),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Ok(Callback::Denied { error, description });
    }
    let Some(code) = code else {
        return Ok(Callback::Ignore);
    };
    if state.as_deref() != Some(expected_state) {
        return Ok(Callback::StateMismatch);
    }
    Ok(Callback::Code(code))
}

/// Block until the callback server receives the redirect.
fn wait_for_callback(
    server: &tiny_http::Server,
    timeout: std::time::Duration,
    expected_state: &str,
) -> Result<String, AuthError> {
    let deadline = std::time::Instant::now() + timeout;
    let timed_out = || {
        AuthError::BrowserFlowFailed(format!(
            "browser callback timed out after {}s",
            timeout.as_secs()
        ))
    };

    loop {
        let remaining = deadline.saturating_duration_since(std::time::Instant::now());
        if remaining.is_zero() {
            return Err(timed_out());
        }

        let request = match server.recv_timeout(remaining) {
            Ok(Some(req)) => req,
            Ok(None) => return Err(timed_out()),
            Err(e) => return Err(AuthError::BrowserFlowFailed(format!("recv error: {e}"))),
        };

        let outcome = parse_callback(request.url(), expected_state);
        let (page, result) = match outcome {
            Ok(Callback::Ignore) => {
                let _ = request.respond(tiny_http::Response::from_string("").with_status_code(204));
                continue;
            }
            Ok(Callback::Code(code)) => (
                "<h1>Signed in</h1><p>You can close this tab and return to the terminal.</p>",
                Ok(code),
            ),
            Ok(Callback::Denied { error, description }) => (
                "<h1>Sign-in failed</h1><p>Check the terminal for details.</p>",
                Err(AuthError::Provider { error, description }),
            ),
            Ok(Callback::StateMismatch) => (
                "<h1>Sign-in failed</h1><p>State mismatch. Check the terminal for details.</p>",
                Err(AuthError::BrowserFlowFailed(
                    "state mismatch: possible CSRF".into(),
                )),
            ),
            Err(error) => (
                "<h1>Sign-in failed</h1><p>Malformed callback.</p>",
                Err(error),
            ),
        };

        let _ = request.respond(html_response(page));
        return result;
    }
}

fn html_response(body: &str) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let response = tiny_http::Response::from_string(format!("<html><body>{body}</body></html>"));
    match tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Redeem an authorization code at the token endpoint.
async fn exchange_code(
    client: &OAuthClient,
    code: &str,
    verifier: &str,
    redirect_uri: &str,
) -> Result<StoredToken, AuthError> {
    let body = token_request_body(client, code, verifier, redirect_uri);
    let resp = reqwest::Client::new()
        .post(TOKEN_URL)
        .header(
            reqwest::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(body)
        .send()
        .await?;

    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(match serde_json::from_str::<TokenErrorResponse>(&text) {
            Ok(e) => AuthError::Provider {
                error: e.error,
                description: e.error_description,
            },
            Err(_) => AuthError::TokenExchange(format!("HTTP {}", status.as_u16())),
        });
    }

    parse_token_response(&text)
}

fn token_request_body(
    client: &OAuthClient,
    code: &str,
    verifier: &str,
    redirect_uri: &str,
) -> String {
    let mut pairs = vec![
        ("grant_type", "authorization_code"),
        ("code", code),
        ("client_id", client.client_id.as_str()),
        ("redirect_uri", redirect_uri),
        ("code_verifier", verifier),
    ];
    if let Some(secret) = client.client_secret.as_deref() {
        pairs.push(("client_secret", secret));
    }
    pairs
        .into_iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn parse_token_response(text: &str) -> Result<StoredToken, AuthError> {
    let data: TokenResponse = serde_json::from_str(text)
        .map_err(|e| AuthError::TokenExchange(format!("unexpected token response: {e}")))?;
    Ok(StoredToken {
        access_token: data.access_token,
        expires_at: data
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs)),
    })
}

/// Hex string of `len` random bytes, used as the CSRF `state`.
fn random_hex(len: usize) -> Result<String, AuthError> {
    let mut bytes = vec![0u8; len];
    getrandom::fill(&mut bytes)
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to generate nonce: {e}")))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

/// 43-character PKCE verifier from 32 random bytes.
fn code_verifier() -> Result<String, AuthError> {
    let mut bytes = [0u8; 32];
    getrandom::fill(&mut bytes)
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to generate verifier: {e}")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}
