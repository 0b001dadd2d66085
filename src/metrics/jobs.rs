use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use k8s_openapi::api::batch::v1::Job;
use kube::{api::ListParams, Api, Client};
use std::collections::BTreeMap;

use crate::template::names::COMPLETED_JOB_COUNT;
use crate::template::pods::stable_job_metric_template;
use crate::template::MetricTemplate;

/// Count completed jobs that finished more than the configured number of
/// hours ago, grouped by controller, and emit them via the stable-job
/// template. These are candidates for cleanup that the backend alerts on.
pub async fn collect_stale_job_templates(
    client: &Client,
    namespace: &str,
    stale_threshold_hours: i64,
    now: DateTime<Utc>,
) -> Result<Vec<MetricTemplate>> {
    let job_api: Api<Job> = Api::namespaced(client.clone(), namespace);
    let jobs = job_api.list(&ListParams::default()).await?;
    Ok(build_stale_job_templates(
        namespace,
        &jobs.items,
        stale_threshold_hours,
        now,
    ))
}

pub fn build_stale_job_templates(
    namespace: &str,
    jobs: &[Job],
    stale_threshold_hours: i64,
    now: DateTime<Utc>,
) -> Vec<MetricTemplate> {
    let cutoff = now - Duration::hours(stale_threshold_hours);
    let mut by_controller: BTreeMap<String, i64> = BTreeMap::new();

    for job in jobs {
        if !is_job_stale(job, cutoff) {
            continue;
        }
        let controller = job_controller_name(job);
        *by_controller.entry(controller).or_insert(0) += 1;
    }

    by_controller
        .into_iter()
        .map(|(controller, count)| {
            stable_job_metric_template(
                now,
                COMPLETED_JOB_COUNT,
                &controller,
                namespace,
                stale_threshold_hours,
                count as f64,
            )
        })
        .collect()
}

// A job is stale when it completed successfully before the cutoff
fn is_job_stale(job: &Job, cutoff: DateTime<Utc>) -> bool {
    let completed = job
        .status
        .as_ref()
        .and_then(|s| s.conditions.as_ref())
        .map(|conditions| {
            conditions
                .iter()
                .any(|c| c.type_ == "Complete" && c.status == "True")
        })
        .unwrap_or(false);
    if !completed {
        return false;
    }

    job.status
        .as_ref()
        .and_then(|s| s.completion_time.as_ref())
        .map(|t| t.0 < cutoff)
        .unwrap_or(false)
}

/// Jobs spawned by a CronJob carry it as owner; standalone jobs report
/// their own name.
fn job_controller_name(job: &Job) -> String {
    job.metadata
        .owner_references
        .as_ref()
        .and_then(|refs| refs.first())
        .map(|r| r.name.clone())
        .or_else(|| job.metadata.name.clone())
        .unwrap_or_default()
}
