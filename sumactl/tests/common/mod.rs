//! Mock SUMA server for integration tests
//!
//! Wraps a wiremock server with helpers for each API endpoint so tests can
//! script login, listing, package and scheduling responses without a real
//! patch-management server.

#![allow(dead_code)]

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sumactl::http::{RetryPolicy, SumaClient};
use sumactl::session::{Credentials, ServerIdentity, Session, SessionToken};

pub const LOGIN_PATH: &str = "/rhn/manager/api/auth/login";
pub const LOGOUT_PATH: &str = "/rhn/manager/api/auth/logout";
pub const LIST_PATH: &str = "/rhn/manager/api/system/listActiveSystems";
pub const PACKAGES_PATH: &str = "/rhn/manager/api/system/listLatestUpgradablePackages";
pub const SCHEDULE_PATH: &str = "/rhn/manager/api/system/schedulePackageInstall";

pub struct MockSumaServer {
    pub server: MockServer,
}

impl MockSumaServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn identity(&self) -> ServerIdentity {
        ServerIdentity::new(&self.server.uri())
    }

    /// A client whose retry delay is shrunk so retry tests run fast; the
    /// retry bound stays at the production value.
    pub fn client(&self) -> SumaClient {
        let http = sumactl::http::build_client().expect("client should build");
        SumaClient::with_retry_policy(
            http,
            RetryPolicy {
                max_retries: 5,
                delay: Duration::from_millis(10),
            },
        )
    }

    /// A session constructed directly, bypassing login, for tests that
    /// exercise the executor in isolation.
    pub fn session(&self) -> Session {
        Session {
            server: self.identity(),
            token: SessionToken {
                name: "pxt-session-cookie".to_string(),
                value: "test-token".to_string(),
                max_age_secs: 3600,
            },
        }
    }

    pub fn credentials() -> Credentials {
        Credentials {
            login: "admin".to_string(),
            password: "secret".to_string(),
        }
    }

    pub async fn mock_login_success(&self, max_age_secs: i64) {
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(
                ResponseTemplate::new(200).insert_header(
                    "set-cookie",
                    format!(
                        "pxt-session-cookie=tok-abc123; Max-Age={}; Path=/rhn; Secure; HttpOnly",
                        max_age_secs
                    )
                    .as_str(),
                ),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_login_without_cookie(&self) {
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_login_rejected(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Logout mock that verifies it is hit exactly `expected` times
    pub async fn mock_logout(&self, expected: u64) {
        Mock::given(method("POST"))
            .and(path(LOGOUT_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(expected)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_list_systems(&self, systems: Value) {
        Mock::given(method("GET"))
            .and(path(LIST_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "result": systems})),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_list_systems_raw(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path(LIST_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_packages_for(&self, sid: i64, packages: Value) {
        Mock::given(method("GET"))
            .and(path(PACKAGES_PATH))
            .and(query_param("sid", sid.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "result": packages})),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_packages_malformed(&self, sid: i64) {
        Mock::given(method("GET"))
            .and(path(PACKAGES_PATH))
            .and(query_param("sid", sid.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_schedule_success(&self, sid: i64, job_id: i64) {
        Mock::given(method("POST"))
            .and(path(SCHEDULE_PATH))
            .and(body_partial_json(json!({"sid": sid})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "result": job_id})),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_schedule_zero_job_id(&self, sid: i64) {
        Mock::given(method("POST"))
            .and(path(SCHEDULE_PATH))
            .and(body_partial_json(json!({"sid": sid})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "result": 0})),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_schedule_rejected(&self, sid: i64) {
        Mock::given(method("POST"))
            .and(path(SCHEDULE_PATH))
            .and(body_partial_json(json!({"sid": sid})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": false, "result": 0})),
            )
            .mount(&self.server)
            .await;
    }

    /// The sids of all schedule submissions received, in arrival order
    pub async fn scheduled_sids(&self) -> Vec<i64> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == SCHEDULE_PATH)
            .filter_map(|r| {
                serde_json::from_slice::<Value>(&r.body)
                    .ok()
                    .and_then(|v| v.get("sid").and_then(Value::as_i64))
            })
            .collect()
    }
}

/// Standard two-host listing used by several tests: host A (id 1) with
/// upgrades, host B (id 2) without.
pub fn two_host_listing() -> Value {
    json!([
        {"id": 1, "name": "web-a", "last_boot": "2026-08-01T04:00:00Z", "last_checkin": "2026-08-30T06:00:00Z"},
        {"id": 2, "name": "db-b", "last_boot": "2026-07-15T04:00:00Z", "last_checkin": "2026-08-30T06:05:00Z"}
    ])
}

pub fn sample_packages() -> Value {
    json!([
        {
            "name": "openssl",
            "arch": "x86_64",
            "from_version": "3.1.4", "from_release": "1.1", "from_epoch": " ", "from_arch": "x86_64",
            "to_version": "3.1.8", "to_release": "1.2", "to_epoch": " ", "to_arch": "x86_64",
            "to_package_id": 9001
        },
        {
            "name": "kernel-default",
            "arch": "x86_64",
            "from_version": "6.4.0", "from_release": "150600.1", "from_epoch": " ", "from_arch": "x86_64",
            "to_version": "6.4.7", "to_release": "150600.4", "to_epoch": " ", "to_arch": "x86_64",
            "to_package_id": 9002
        }
    ])
}
