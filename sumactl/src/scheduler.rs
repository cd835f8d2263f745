//! Update scheduler: computes the earliest-occurrence timestamp and submits
//! one install job per host with pending upgrades.
//!
//! Hosts with nothing to install are skipped and the loop continues with
//! the rest of the fleet. A rejected scheduling call is fail-fast for the
//! remaining loop: it usually means session or server-side trouble that
//! will recur for every host still in line.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use reqwest::Method;
use serde_json::json;
use tracing::info;

use crate::constants::api;
use crate::errors::ScheduleError;
use crate::fleet::{ApiResult, FleetSnapshot, ScheduledJob};
use crate::http::SumaClient;
use crate::session::Session;

/// Converts a relative offset in hours (fractional allowed) to an absolute
/// timestamp. An empty, unparsable or negative offset means "no schedule
/// requested" and yields `None` rather than an error; so does an offset too
/// large to represent as a timestamp.
pub fn compute_earliest_occurrence(offset_hours: &str) -> Option<DateTime<Utc>> {
    let trimmed = offset_hours.trim();
    if trimmed.is_empty() {
        return None;
    }

    let hours: f64 = trimmed.parse().ok()?;
    if !hours.is_finite() || hours < 0.0 {
        return None;
    }

    // The float-to-int cast saturates on overflow and checked_add_signed
    // rejects timestamps chrono cannot represent.
    let offset = Duration::milliseconds((hours * 3_600_000.0) as i64);
    Utc::now().checked_add_signed(offset)
}

/// Renders the timestamp the way the wire protocol expects it
pub fn format_earliest(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Submits one package-install job per host with pending upgrades, in
/// listing order, recording each accepted job id on its host. Returns the
/// number of jobs created.
pub async fn schedule_installs(
    client: &SumaClient,
    session: &Session,
    snapshot: &mut FleetSnapshot,
    offset_hours: &str,
) -> Result<usize, ScheduleError> {
    if compute_earliest_occurrence(offset_hours).is_none() {
        info!("No schedule offset given, skipping install scheduling");
        return Ok(0);
    }

    let mut jobs_created = 0;

    for host in &mut snapshot.hosts {
        if host.upgrades.is_empty() {
            info!("Skip system {}: no updates to install", host.name);
            continue;
        }

        // Recomputed per host so the offset stays relative to submission
        // time; the offset was already validated above.
        let earliest = match compute_earliest_occurrence(offset_hours) {
            Some(ts) => format_earliest(ts),
            None => continue,
        };

        let package_ids: Vec<i64> = host.upgrades.iter().map(|p| p.to_package_id).collect();
        let body = json!({
            "sid": host.id,
            "packageIds": package_ids,
            "earliestOccurrence": earliest,
        });

        let response = client
            .execute(
                Method::POST,
                api::SCHEDULE_PACKAGE_INSTALL,
                &[],
                Some(&body),
                session,
            )
            .await?;

        let raw = response.text().await.unwrap_or_default();
        let job: ApiResult<i64> = serde_json::from_str(&raw).unwrap_or(ApiResult {
            success: false,
            result: 0,
        });

        if !job.success || job.result == 0 {
            return Err(ScheduleError::JobRejected {
                host: host.name.clone(),
                body: raw,
            });
        }

        info!("Job {} created for {}", job.result, host.name);
        host.jobs.push(ScheduledJob {
            id: job.result,
            success: true,
        });
        jobs_created += 1;
    }

    Ok(jobs_created)
}
