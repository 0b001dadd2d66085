use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::Pod;
use std::collections::BTreeMap;

use super::base::pod_controller_name;
use crate::template::names::{
    OOM_KILLED_CONTAINER_COUNT, POD_READY_PERCENTAGE, RESTARTING_CONTAINER_COUNT,
};
use crate::template::pods::pod_metric_template;
use crate::template::MetricTemplate;

#[derive(Debug, Default)]
struct ControllerCounts {
    pods: i64,
    ready_pods: i64,
    restarting_containers: i64,
    oom_killed_containers: i64,
}

/// Build pod-level templates for one namespace: ready percentage per
/// controller, plus restart and OOM counters when non-zero.
pub fn build_pod_templates(
    namespace: &str,
    pods: &[Pod],
    now: DateTime<Utc>,
) -> Vec<MetricTemplate> {
    // BTreeMap keeps template ordering stable across runs
    let mut by_controller: BTreeMap<String, ControllerCounts> = BTreeMap::new();

    for pod in pods {
        let counts = by_controller.entry(pod_controller_name(pod)).or_default();
        counts.pods += 1;
        if is_pod_ready(pod) {
            counts.ready_pods += 1;
        }
        counts.restarting_containers += count_restarting_containers(pod);
        counts.oom_killed_containers += count_oom_killed_containers(pod);
    }

    let mut templates = Vec::new();
    for (controller, counts) in by_controller {
        let ready_pct = (counts.ready_pods as f64 / counts.pods as f64) * 100.0;
        templates.push(pod_metric_template(
            now,
            POD_READY_PERCENTAGE,
            &controller,
            namespace,
            ready_pct,
        ));

        if counts.restarting_containers > 0 {
            templates.push(pod_metric_template(
                now,
                RESTARTING_CONTAINER_COUNT,
                &controller,
                namespace,
                counts.restarting_containers as f64,
            ));
        }
        if counts.oom_killed_containers > 0 {
            templates.push(pod_metric_template(
                now,
                OOM_KILLED_CONTAINER_COUNT,
                &controller,
                namespace,
                counts.oom_killed_containers as f64,
            ));
        }
    }
    templates
}

fn is_pod_ready(pod: &Pod) -> bool {
    pod.status
        .as_ref()
        .and_then(|s| s.conditions.as_ref())
        .map(|conditions| {
            conditions
                .iter()
                .any(|c| c.type_ == "Ready" && c.status == "True")
        })
        .unwrap_or(false)
}

fn count_restarting_containers(pod: &Pod) -> i64 {
    pod.status
        .as_ref()
        .and_then(|s| s.container_statuses.as_ref())
        .map(|statuses| statuses.iter().filter(|cs| cs.restart_count > 0).count() as i64)
        .unwrap_or(0)
}

fn count_oom_killed_containers(pod: &Pod) -> i64 {
    pod.status
        .as_ref()
        .and_then(|s| s.container_statuses.as_ref())
        .map(|statuses| {
            statuses
                .iter()
                .filter(|cs| {
                    cs.last_state
                        .as_ref()
                        .and_then(|ls| ls.terminated.as_ref())
                        .and_then(|t| t.reason.as_deref())
                        == Some("OOMKilled")
                })
                .count() as i64
        })
        .unwrap_or(0)
}
