//! Fleet data model and query pipeline
//!
//! `list_hosts` builds the in-memory fleet snapshot from the server's host
//! listing; `fetch_packages` then attaches each host's upgradable-package
//! set in listing order. A per-host fetch failure only empties that host's
//! set: one host's API hiccup must not block reporting or scheduling for
//! the rest of the fleet.

use reqwest::Method;
use serde::Deserialize;
use tracing::{info, warn};

use crate::constants::api;
use crate::errors::QueryError;
use crate::http::SumaClient;
use crate::session::Session;

/// Envelope every server endpoint wraps its payload in
#[derive(Debug, Deserialize)]
pub struct ApiResult<T> {
    pub success: bool,
    #[serde(default)]
    pub result: T,
}

/// One host record as returned by the listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SystemRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub last_boot: String,
    #[serde(default)]
    pub last_checkin: String,
}

/// One upgradable package on a host; immutable once fetched
#[derive(Debug, Clone, Deserialize)]
pub struct PackageUpgrade {
    pub name: String,
    #[serde(default)]
    pub arch: String,
    #[serde(default)]
    pub from_version: String,
    #[serde(default)]
    pub from_release: String,
    #[serde(default)]
    pub from_epoch: String,
    #[serde(default)]
    pub from_arch: String,
    #[serde(default)]
    pub to_version: String,
    #[serde(default)]
    pub to_release: String,
    #[serde(default)]
    pub to_epoch: String,
    #[serde(default)]
    pub to_arch: String,
    pub to_package_id: i64,
}

/// A job the server accepted; appended to its host, never mutated after
#[derive(Debug, Clone)]
pub struct ScheduledJob {
    pub id: i64,
    pub success: bool,
}

/// A managed host plus the per-run state the pipeline accumulates for it
#[derive(Debug, Clone)]
pub struct Host {
    pub id: i64,
    pub name: String,
    pub last_boot: String,
    pub last_checkin: String,
    pub upgrades: Vec<PackageUpgrade>,
    pub jobs: Vec<ScheduledJob>,
}

impl From<SystemRecord> for Host {
    fn from(record: SystemRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            last_boot: record.last_boot,
            last_checkin: record.last_checkin,
            upgrades: Vec::new(),
            jobs: Vec::new(),
        }
    }
}

/// The fleet for one run, in server-returned order; in-memory only
#[derive(Debug, Default)]
pub struct FleetSnapshot {
    pub hosts: Vec<Host>,
}

/// Fetches the active host listing. An unsuccessful response or an empty
/// fleet is terminal for the run: there is nothing to query or schedule.
pub async fn list_hosts(
    client: &SumaClient,
    session: &Session,
) -> Result<FleetSnapshot, QueryError> {
    let url = session.server.url_for(api::LIST_ACTIVE_SYSTEMS);

    let response = client
        .execute(Method::GET, api::LIST_ACTIVE_SYSTEMS, &[], None, session)
        .await?;

    if !response.status().is_success() {
        return Err(QueryError::Api { url });
    }

    let listing: ApiResult<Vec<SystemRecord>> =
        response.json().await.map_err(|e| QueryError::Decode {
            url: url.clone(),
            reason: e.to_string(),
        })?;

    if !listing.success {
        return Err(QueryError::Api { url });
    }
    if listing.result.is_empty() {
        return Err(QueryError::EmptyFleet);
    }

    info!("Found {} active systems", listing.result.len());

    Ok(FleetSnapshot {
        hosts: listing.result.into_iter().map(Host::from).collect(),
    })
}

/// Attaches each host's upgradable-package set, in listing order. Per-host
/// failures are logged and leave that host's set empty (treated as "no
/// upgrades"); the pipeline always continues.
pub async fn fetch_packages(client: &SumaClient, session: &Session, snapshot: &mut FleetSnapshot) {
    for host in &mut snapshot.hosts {
        let query = [("sid", host.id.to_string())];

        let response = match client
            .execute(
                Method::GET,
                api::LIST_UPGRADABLE_PACKAGES,
                &query,
                None,
                session,
            )
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Package query for {} failed: {}", host.name, e);
                continue;
            }
        };

        let packages: ApiResult<Vec<PackageUpgrade>> = match response.json().await {
            Ok(packages) => packages,
            Err(e) => {
                warn!("Package response for {} did not decode: {}", host.name, e);
                continue;
            }
        };

        if !packages.success {
            warn!("Package query for {} reported failure", host.name);
            continue;
        }

        info!("{}: {} upgradable packages", host.name, packages.result.len());
        host.upgrades = packages.result;
    }
}
