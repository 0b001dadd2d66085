use anyhow::Result;
use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::Node;
use kube::{api::ListParams, Api, Client};
use tracing::warn;

use super::base::{
    build_node_metrics_map, get_node_stats_summary, list_node_metrics_http, FsStats,
    NodeMetricsItem, NodeStats,
};
use crate::parsing::{parse_cpu_to_millicores, parse_memory_to_bytes};
use crate::template::names::{
    CPU_USAGE_MILLICORES, CPU_USAGE_PERCENTAGE, DISK_USED_PERCENTAGE, MEMORY_RSS_BYTES,
    MEMORY_RSS_PERCENTAGE,
};
use crate::template::nodes::{disk_used_percentage_template, node_resource_metric_template};
use crate::template::MetricTemplate;

/// Collect per-node resource templates: CPU and memory usage (raw and as a
/// percentage of capacity) from the metrics API, disk usage per filesystem
/// from the kubelet summary.
pub async fn collect_node_templates(
    client: &Client,
    now: DateTime<Utc>,
) -> Result<Vec<MetricTemplate>> {
    let node_api: Api<Node> = Api::all(client.clone());
    let nodes = node_api.list(&ListParams::default()).await?;

    let node_metrics = list_node_metrics_http(client).await?;
    let metrics_by_node = build_node_metrics_map(node_metrics);

    let mut templates = Vec::new();
    for node in nodes.items {
        let node_name = match node.metadata.name.as_ref() {
            Some(n) => n.clone(),
            None => continue,
        };

        if let Some(metrics) = metrics_by_node.get(&node_name) {
            templates.extend(build_node_usage_templates(&node, &node_name, metrics, now));
        }

        match get_node_stats_summary(client, &node_name).await {
            Ok(summary) => {
                templates.extend(build_disk_templates(&node_name, &summary.node, now))
            }
            Err(e) => warn!("stats summary unavailable for node {}: {}", node_name, e),
        }
    }

    Ok(templates)
}

pub fn build_node_usage_templates(
    node: &Node,
    host: &str,
    metrics: &NodeMetricsItem,
    now: DateTime<Utc>,
) -> Vec<MetricTemplate> {
    let mut templates = Vec::new();

    let cpu_usage = metrics.usage.get("cpu").and_then(|q| parse_cpu_to_millicores(q));
    let memory_usage = metrics.usage.get("memory").and_then(|q| parse_memory_to_bytes(q));

    if let Some(usage_mc) = cpu_usage {
        templates.push(node_resource_metric_template(
            now,
            CPU_USAGE_MILLICORES,
            host,
            usage_mc as f64,
        ));
        if let Some(capacity_mc) = node_cpu_capacity_millicores(node) {
            if capacity_mc > 0 {
                templates.push(node_resource_metric_template(
                    now,
                    CPU_USAGE_PERCENTAGE,
                    host,
                    (usage_mc as f64 / capacity_mc as f64) * 100.0,
                ));
            }
        }
    }

    if let Some(usage_bytes) = memory_usage {
        templates.push(node_resource_metric_template(
            now,
            MEMORY_RSS_BYTES,
            host,
            usage_bytes as f64,
        ));
        if let Some(capacity_bytes) = node_memory_capacity_bytes(node) {
            if capacity_bytes > 0 {
                templates.push(node_resource_metric_template(
                    now,
                    MEMORY_RSS_PERCENTAGE,
                    host,
                    (usage_bytes as f64 / capacity_bytes as f64) * 100.0,
                ));
            }
        }
    }

    templates
}

pub fn build_disk_templates(
    host: &str,
    node_stats: &NodeStats,
    now: DateTime<Utc>,
) -> Vec<MetricTemplate> {
    let mut templates = Vec::new();

    if let Some(pct) = node_stats.fs.as_ref().and_then(fs_used_percentage) {
        templates.push(disk_used_percentage_template(
            now,
            DISK_USED_PERCENTAGE,
            host,
            "rootfs",
            pct,
        ));
    }
    if let Some(pct) = node_stats
        .runtime
        .as_ref()
        .and_then(|r| r.image_fs.as_ref())
        .and_then(fs_used_percentage)
    {
        templates.push(disk_used_percentage_template(
            now,
            DISK_USED_PERCENTAGE,
            host,
            "imagefs",
            pct,
        ));
    }

    templates
}

fn fs_used_percentage(fs: &FsStats) -> Option<f64> {
    match (fs.used_bytes, fs.capacity_bytes) {
        (Some(used), Some(capacity)) if capacity > 0 => {
            Some((used as f64 / capacity as f64) * 100.0)
        }
        _ => None,
    }
}

fn node_cpu_capacity_millicores(node: &Node) -> Option<i64> {
    node.status
        .as_ref()
        .and_then(|s| s.capacity.as_ref())
        .and_then(|c| c.get("cpu"))
        .and_then(|q| parse_cpu_to_millicores(&q.0))
}

fn node_memory_capacity_bytes(node: &Node) -> Option<i64> {
    node.status
        .as_ref()
        .and_then(|s| s.capacity.as_ref())
        .and_then(|c| c.get("memory"))
        .and_then(|q| parse_memory_to_bytes(&q.0))
}
