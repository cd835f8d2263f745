//! HTTP transport configuration
//!
//! One client owns the connection pool for the lifetime of a run. TLS peer
//! verification is disabled because the target servers run internal CAs;
//! this is a deliberate trust decision for this deployment, not an
//! oversight. Redirect following is disabled so the raw 3xx/401 statuses
//! reach the retry and auth logic instead of being swallowed.

use anyhow::{anyhow, Result};
use reqwest::{redirect, Client};

use crate::constants::http::{MAX_IDLE_PER_HOST, REQUEST_TIMEOUT};

pub fn build_client() -> Result<Client> {
    Client::builder()
        .danger_accept_invalid_certs(true)
        .redirect(redirect::Policy::none())
        .timeout(REQUEST_TIMEOUT)
        .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
        .build()
        .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))
}
