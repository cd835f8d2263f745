//! Session store: server identity, credentials, and the login-issued token
//!
//! The session is explicit state threaded through every authenticated call.
//! There is no ambient cookie jar; the token travels as a plain value from
//! login to the request executor, and logout consumes the `Session` so the
//! type system rules out authenticated calls after logout.

use serde::Serialize;

use crate::constants::session::{MIN_TOKEN_MAX_AGE_SECS, SESSION_COOKIE};

/// The target server, as a bare host or host:port
#[derive(Debug, Clone)]
pub struct ServerIdentity {
    base_url: String,
}

impl ServerIdentity {
    /// Accepts either a bare host ("suma.example.com") or a full URL;
    /// bare hosts get the https scheme the server requires.
    pub fn new(server: &str) -> Self {
        let base_url = if server.starts_with("http://") || server.starts_with("https://") {
            server.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", server.trim_end_matches('/'))
        };
        Self { base_url }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Login credentials, serialized directly as the login request body
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// Session cookie captured from the login response
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub name: String,
    pub value: String,
    pub max_age_secs: i64,
}

impl SessionToken {
    /// Parses one Set-Cookie header value. Only the name=value pair and the
    /// Max-Age attribute matter here; everything else is ignored.
    pub fn from_set_cookie(header: &str) -> Option<Self> {
        let mut parts = header.split(';');
        let (name, value) = parts.next()?.trim().split_once('=')?;
        if name.is_empty() {
            return None;
        }

        let mut max_age_secs = 0;
        for attr in parts {
            if let Some((key, val)) = attr.trim().split_once('=') {
                if key.eq_ignore_ascii_case("max-age") {
                    max_age_secs = val.trim().parse().unwrap_or(0);
                }
            }
        }

        Some(Self {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
            max_age_secs,
        })
    }

    /// A token is usable only if it is the server's session cookie and its
    /// validity window meets the acceptance threshold. Shorter-lived cookies
    /// show up on failed logins and must not be treated as a session.
    pub fn qualifies(&self) -> bool {
        self.name == SESSION_COOKIE && self.max_age_secs >= MIN_TOKEN_MAX_AGE_SECS
    }

    /// Value for the Cookie request header on authenticated calls
    pub fn cookie_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// A live authenticated session: one per server identity, created by login,
/// destroyed by logout.
#[derive(Debug)]
pub struct Session {
    pub server: ServerIdentity,
    pub token: SessionToken,
}
