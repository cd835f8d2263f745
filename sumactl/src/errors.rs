//! Error types for the patch automation client
//!
//! Each pipeline phase has its own error enum so call sites can decide
//! fatality per phase: login and fleet listing failures abort the run,
//! per-host package fetch failures are recovered locally, a scheduling
//! failure stops the remaining scheduling loop, and a logout failure is
//! reported but never unwinds already-recorded results.

use std::fmt;

/// Transport-level failure surfaced by the request executor
#[derive(Debug)]
pub enum TransportError {
    /// Request could not be sent or the connection failed
    Request { url: String, reason: String },
}

/// Login failures; all of these abort the run before any data is touched
#[derive(Debug)]
pub enum AuthError {
    /// Server answered the login with a non-200 status
    Rejected { status: u16 },

    /// 200 response but no session cookie with the expected name
    MissingToken,

    /// Session cookie present but its declared max-age is below the
    /// acceptance threshold
    ShortLivedToken { max_age_secs: i64 },

    /// Login request itself failed
    Transport(TransportError),
}

/// Fleet listing failures; fatal, nothing useful can proceed without hosts
#[derive(Debug)]
pub enum QueryError {
    /// Server reported success:false
    Api { url: String },

    /// Listing succeeded but returned zero hosts
    EmptyFleet,

    /// Response body did not decode
    Decode { url: String, reason: String },

    Transport(TransportError),
}

/// Scheduling failures; fatal for the remaining scheduling loop
#[derive(Debug)]
pub enum ScheduleError {
    /// Server refused the job or returned a zero job id
    JobRejected { host: String, body: String },

    Transport(TransportError),
}

/// Logout failures; reported, non-fatal
#[derive(Debug)]
pub enum LogoutError {
    /// Final status after retries was not 200
    Failed { status: u16 },

    Transport(TransportError),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Request { url, reason } => {
                write!(f, "Request to {} failed: {}", url, reason)
            }
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Rejected { status } => {
                write!(f, "Login rejected with status {}", status)
            }
            AuthError::MissingToken => {
                write!(f, "Login response carried no qualifying session cookie")
            }
            AuthError::ShortLivedToken { max_age_secs } => {
                write!(
                    f,
                    "Session cookie max-age {}s is below the acceptance threshold",
                    max_age_secs
                )
            }
            AuthError::Transport(e) => write!(f, "Login transport error: {}", e),
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Api { url } => {
                write!(f, "API call {} reported failure", url)
            }
            QueryError::EmptyFleet => {
                write!(f, "No active systems found, nothing to do")
            }
            QueryError::Decode { url, reason } => {
                write!(f, "Failed to decode response from {}: {}", url, reason)
            }
            QueryError::Transport(e) => write!(f, "Fleet query transport error: {}", e),
        }
    }
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::JobRejected { host, body } => {
                write!(f, "No schedule job created for {}: {}", host, body)
            }
            ScheduleError::Transport(e) => write!(f, "Scheduling transport error: {}", e),
        }
    }
}

impl fmt::Display for LogoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogoutError::Failed { status } => {
                write!(f, "Logout failed with status {}", status)
            }
            LogoutError::Transport(e) => write!(f, "Logout transport error: {}", e),
        }
    }
}

impl std::error::Error for TransportError {}
impl std::error::Error for AuthError {}
impl std::error::Error for QueryError {}
impl std::error::Error for ScheduleError {}
impl std::error::Error for LogoutError {}

impl From<TransportError> for AuthError {
    fn from(err: TransportError) -> Self {
        AuthError::Transport(err)
    }
}

impl From<TransportError> for QueryError {
    fn from(err: TransportError) -> Self {
        QueryError::Transport(err)
    }
}

impl From<TransportError> for ScheduleError {
    fn from(err: TransportError) -> Self {
        ScheduleError::Transport(err)
    }
}

impl From<TransportError> for LogoutError {
    fn from(err: TransportError) -> Self {
        LogoutError::Transport(err)
    }
}
