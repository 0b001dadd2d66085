use anyhow::Result;
use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::{Container, Pod};
use kube::Client;
use std::collections::HashMap;

use super::base::{build_container_usage_map, list_pod_metrics_http, pod_controller_name};
use crate::parsing::{compute_utilization_percentages, parse_cpu_to_millicores, parse_memory_to_bytes};
use crate::template::containers::{
    container_resource_threshold_violation_template, container_resource_utilization_template,
};
use crate::template::names::{
    CPU_EXCEEDED_PERCENTAGE, CPU_THRESHOLD_VIOLATED, MEMORY_RSS_EXCEEDED_PERCENTAGE,
    MEMORY_RSS_THRESHOLD_VIOLATED,
};
use crate::template::MetricTemplate;
use crate::types::{ContainerRequestTotals, ContainerUsageTotals};

/// Collect utilization and violation templates for containers whose CPU or
/// memory usage exceeds the threshold percentage of their requests.
pub async fn collect_container_templates(
    client: &Client,
    namespace: &str,
    pods: &[Pod],
    threshold_percent: f64,
    now: DateTime<Utc>,
) -> Result<Vec<MetricTemplate>> {
    let metrics_items = list_pod_metrics_http(client, namespace).await?;
    let usage_by_container = build_container_usage_map(metrics_items);
    Ok(build_container_templates(
        namespace,
        pods,
        &usage_by_container,
        threshold_percent,
        now,
    ))
}

pub fn build_container_templates(
    namespace: &str,
    pods: &[Pod],
    usage_by_container: &HashMap<(String, String), ContainerUsageTotals>,
    threshold_percent: f64,
    now: DateTime<Utc>,
) -> Vec<MetricTemplate> {
    let mut templates = Vec::new();

    for pod in pods {
        let pod_name = match pod.metadata.name.as_ref() {
            Some(n) => n.clone(),
            None => continue,
        };
        let controller = pod_controller_name(pod);

        let spec = match pod.spec.as_ref() {
            Some(s) => s,
            None => continue,
        };

        for container in &spec.containers {
            let key = (pod_name.clone(), container.name.clone());
            let usage = match usage_by_container.get(&key) {
                Some(u) => u,
                None => continue,
            };

            let requests = container_requests(container);
            let (cpu_pct, mem_pct) = compute_utilization_percentages(usage, &requests);

            if let Some(cpu) = cpu_pct {
                if cpu > threshold_percent {
                    templates.push(container_resource_utilization_template(
                        now,
                        CPU_EXCEEDED_PERCENTAGE,
                        &container.name,
                        &pod_name,
                        &controller,
                        namespace,
                        threshold_percent,
                        cpu,
                    ));
                    templates.push(container_resource_threshold_violation_template(
                        now,
                        CPU_THRESHOLD_VIOLATED,
                        &container.name,
                        &pod_name,
                        &controller,
                        namespace,
                        threshold_percent,
                        1.0,
                    ));
                }
            }
            if let Some(mem) = mem_pct {
                if mem > threshold_percent {
                    templates.push(container_resource_utilization_template(
                        now,
                        MEMORY_RSS_EXCEEDED_PERCENTAGE,
                        &container.name,
                        &pod_name,
                        &controller,
                        namespace,
                        threshold_percent,
                        mem,
                    ));
                    templates.push(container_resource_threshold_violation_template(
                        now,
                        MEMORY_RSS_THRESHOLD_VIOLATED,
                        &container.name,
                        &pod_name,
                        &controller,
                        namespace,
                        threshold_percent,
                        1.0,
                    ));
                }
            }
        }
    }

    templates
}

fn container_requests(container: &Container) -> ContainerRequestTotals {
    let mut totals = ContainerRequestTotals::default();
    if let Some(requests) = container
        .resources
        .as_ref()
        .and_then(|r| r.requests.as_ref())
    {
        totals.cpu_millicores = requests
            .get("cpu")
            .and_then(|q| parse_cpu_to_millicores(&q.0));
        totals.memory_bytes = requests
            .get("memory")
            .and_then(|q| parse_memory_to_bytes(&q.0));
    }
    totals
}
