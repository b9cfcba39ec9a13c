//! Opaque session association established on login.
//!
//! A uuid token maps to a user id in an in-process table; the client carries
//! the token in an HttpOnly cookie and never inspects it. There is no expiry
//! model. Nothing is enforced on the session today except the optional
//! ownership policy on feedback mutation.

use std::collections::HashMap;

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Cookie name carrying the session token.
pub const SESSION_COOKIE: &str = "cinepulse_session";

/// In-memory token -> user id table.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for a user and return the opaque token.
    pub async fn create(&self, user_id: &str) -> String {
        assert!(!user_id.is_empty(), "session must reference a user");

        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), user_id.to_string());
        token
    }

    /// Resolve a token to the user id it was issued for.
    pub async fn get(&self, token: &str) -> Option<String> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }
}

/// Build the `Set-Cookie` value for a freshly issued token.
#[must_use]
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// Extract the session token from a request's Cookie header, if any.
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}
