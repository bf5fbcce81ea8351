//! Session cookie plumbing.

use axum::http::{header, HeaderMap};

/// Cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "skiff_session";

/// Only tokens Skiff itself issues (32 lowercase hex chars) are accepted
/// from clients; anything else gets a fresh session.
fn is_valid_token(value: &str) -> bool {
    value.len() == 32
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

/// Extract the session token from the request's `Cookie` header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && is_valid_token(value)).then(|| value.to_string())
    })
}

/// `Set-Cookie` value (re)establishing the session token.
pub fn set_session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}
