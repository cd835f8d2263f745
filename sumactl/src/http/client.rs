//! Authenticated session client: login, logout, and the retrying executor
//!
//! Every authenticated call goes through [`SumaClient::execute`], which
//! attaches the session cookie and absorbs the server's post-login race
//! window: the login endpoint occasionally reports success before the
//! session is fully propagated server-side, so the first calls after login
//! can see transient 401s. A bounded retry with fixed delay covers that
//! without re-logging-in. Login itself is unauthenticated and not retried.

use std::time::Duration;

use reqwest::{header, Client, Method, Response, StatusCode};
use serde_json::Value;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::constants::{api, retry};
use crate::errors::{AuthError, LogoutError, TransportError};
use crate::session::{Credentials, ServerIdentity, Session, SessionToken};

/// Bounded fixed-backoff policy for 401 responses
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the initial attempt
    pub max_retries: u32,
    /// Fixed sleep between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: retry::MAX_RETRIES,
            delay: retry::RETRY_DELAY,
        }
    }
}

pub struct SumaClient {
    http: Client,
    retry: RetryPolicy,
}

impl SumaClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(http: Client, retry: RetryPolicy) -> Self {
        Self { http, retry }
    }

    /// Exchanges credentials for a session token.
    ///
    /// A 200 response must carry the server's session cookie with a
    /// max-age at or above the acceptance threshold; anything else is a
    /// login failure and the pipeline must not proceed.
    pub async fn login(
        &self,
        server: ServerIdentity,
        credentials: &Credentials,
    ) -> Result<Session, AuthError> {
        let url = server.url_for(api::LOGIN);

        let response = self
            .http
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            });
        }

        let mut short_lived: Option<i64> = None;
        for raw in response.headers().get_all(header::SET_COOKIE) {
            let Ok(raw) = raw.to_str() else { continue };
            let Some(token) = SessionToken::from_set_cookie(raw) else {
                continue;
            };
            if token.qualifies() {
                info!("Login successful on {}", url);
                return Ok(Session { server, token });
            }
            if token.name == crate::constants::session::SESSION_COOKIE {
                short_lived = Some(token.max_age_secs);
            }
        }

        match short_lived {
            Some(max_age_secs) => Err(AuthError::ShortLivedToken { max_age_secs }),
            None => Err(AuthError::MissingToken),
        }
    }

    /// Issues one authenticated request, retrying on 401 up to the policy
    /// bound with a fixed delay between attempts. Returns the last response
    /// whatever its status once a non-401 arrives or the bound is spent;
    /// the call site decides what a failure status means for its phase.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        session: &Session,
    ) -> Result<Response, TransportError> {
        let url = session.server.url_for(path);
        let mut attempt = 0u32;

        loop {
            let mut request = self
                .http
                .request(method.clone(), &url)
                .header(header::COOKIE, session.token.cookie_header());
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await.map_err(|e| TransportError::Request {
                url: url.clone(),
                reason: e.to_string(),
            })?;

            if response.status() != StatusCode::UNAUTHORIZED || attempt >= self.retry.max_retries
            {
                return Ok(response);
            }

            attempt += 1;
            warn!(
                "{} returned 401, retry {}/{} in {:?}",
                url, attempt, self.retry.max_retries, self.retry.delay
            );
            sleep(self.retry.delay).await;
        }
    }

    /// Invalidates the session server-side. Consumes the session: no
    /// authenticated call can follow a logout. A failed logout is reported
    /// by the caller but does not reverse prior work.
    pub async fn logout(&self, session: Session) -> Result<(), LogoutError> {
        let response = self
            .execute(Method::POST, api::LOGOUT, &[], None, &session)
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LogoutError::Failed {
                status: status.as_u16(),
            });
        }

        info!("Logged out");
        Ok(())
    }
}
