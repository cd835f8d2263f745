//! Application-wide constants for timeouts, limits, and endpoint paths
//!
//! Single source of truth for the magic numbers the transport, retry and
//! session layers depend on.

use std::time::Duration;

/// HTTP transport constants
pub mod http {
    use super::Duration;

    /// Overall per-request timeout
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum idle connections kept per host in the pool
    pub const MAX_IDLE_PER_HOST: usize = 100;
}

/// Session token constants
pub mod session {
    /// Cookie name the server issues the session token under
    pub const SESSION_COOKIE: &str = "pxt-session-cookie";

    /// Tokens with a declared max-age below this are rejected at login
    pub const MIN_TOKEN_MAX_AGE_SECS: i64 = 30;
}

/// 401 retry constants
pub mod retry {
    use super::Duration;

    /// Maximum number of retries after the initial attempt
    pub const MAX_RETRIES: u32 = 5;

    /// Fixed delay between retries
    pub const RETRY_DELAY: Duration = Duration::from_secs(2);
}

/// Server API endpoint paths
pub mod api {
    pub const LOGIN: &str = "/rhn/manager/api/auth/login";
    pub const LOGOUT: &str = "/rhn/manager/api/auth/logout";
    pub const LIST_ACTIVE_SYSTEMS: &str = "/rhn/manager/api/system/listActiveSystems";
    pub const LIST_UPGRADABLE_PACKAGES: &str =
        "/rhn/manager/api/system/listLatestUpgradablePackages";
    pub const SCHEDULE_PACKAGE_INSTALL: &str =
        "/rhn/manager/api/system/schedulePackageInstall";
}
