use anyhow::{anyhow, Result};
use k8s_openapi::api::core::v1::Pod;
use kube::Client;
use serde::Deserialize;
use std::collections::HashMap;

use crate::parsing::{parse_cpu_to_millicores, parse_memory_to_bytes};
use crate::types::ContainerUsageTotals;

// Fallback controller dim for pods without an owner reference
pub const NO_CONTROLLER: &str = "No Controller";

#[derive(Debug, Deserialize)]
pub struct ContainerMetrics {
    pub name: String,
    pub usage: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct PodMetricsItem {
    pub metadata: serde_json::Value,
    pub containers: Vec<ContainerMetrics>,
}

#[derive(Debug, Deserialize)]
pub struct PodMetricsList {
    pub items: Vec<PodMetricsItem>,
}

#[derive(Debug, Deserialize)]
pub struct NodeMetricsItem {
    pub metadata: serde_json::Value,
    pub usage: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct NodeMetricsList {
    pub items: Vec<NodeMetricsItem>,
}

// Kubelet stats summary, read through the API server node proxy. Only the
// fields the collectors consume are modeled.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub node: NodeStats,
    #[serde(default)]
    pub pods: Vec<PodStats>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStats {
    pub node_name: String,
    pub fs: Option<FsStats>,
    pub runtime: Option<RuntimeStats>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeStats {
    pub image_fs: Option<FsStats>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FsStats {
    pub used_bytes: Option<u64>,
    pub capacity_bytes: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodStats {
    pub pod_ref: PodReference,
    #[serde(default)]
    pub volume: Vec<VolumeStats>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodReference {
    pub name: String,
    pub namespace: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeStats {
    pub name: String,
    pub used_bytes: Option<u64>,
    pub capacity_bytes: Option<u64>,
    pub pvc_ref: Option<PvcReference>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PvcReference {
    pub name: String,
}

pub async fn list_pod_metrics_http(client: &Client, namespace: &str) -> Result<Vec<PodMetricsItem>> {
    use http::Request as HttpRequest;
    let path = format!("/apis/metrics.k8s.io/v1beta1/namespaces/{}/pods", namespace);
    let req = HttpRequest::builder()
        .method("GET")
        .uri(path)
        .body(Vec::new())
        .map_err(|e| anyhow!("build request: {}", e))?;
    let list: PodMetricsList = client.request(req).await?;
    Ok(list.items)
}

pub async fn list_node_metrics_http(client: &Client) -> Result<Vec<NodeMetricsItem>> {
    use http::Request as HttpRequest;
    let path = "/apis/metrics.k8s.io/v1beta1/nodes";
    let req = HttpRequest::builder()
        .method("GET")
        .uri(path)
        .body(Vec::new())
        .map_err(|e| anyhow!("build request: {}", e))?;
    let list: NodeMetricsList = client.request(req).await?;
    Ok(list.items)
}

pub async fn get_node_stats_summary(client: &Client, node_name: &str) -> Result<StatsSummary> {
    use http::Request as HttpRequest;
    let path = format!("/api/v1/nodes/{}/proxy/stats/summary", node_name);
    let req = HttpRequest::builder()
        .method("GET")
        .uri(path)
        .body(Vec::new())
        .map_err(|e| anyhow!("build request: {}", e))?;
    let summary: StatsSummary = client.request(req).await?;
    Ok(summary)
}

/// Per-container usage keyed by (pod name, container name).
pub fn build_container_usage_map(
    items: Vec<PodMetricsItem>,
) -> HashMap<(String, String), ContainerUsageTotals> {
    let mut map = HashMap::new();
    for item in items {
        let pod_name = item
            .metadata
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        if pod_name.is_empty() {
            continue;
        }
        for c in item.containers {
            let mut totals = ContainerUsageTotals::default();
            if let Some(cpu_q) = c.usage.get("cpu") {
                if let Some(mc) = parse_cpu_to_millicores(cpu_q) {
                    totals.cpu_millicores = mc;
                }
            }
            if let Some(mem_q) = c.usage.get("memory") {
                if let Some(bytes) = parse_memory_to_bytes(mem_q) {
                    totals.memory_bytes = bytes;
                }
            }
            map.insert((pod_name.clone(), c.name), totals);
        }
    }
    map
}

pub fn build_node_metrics_map(items: Vec<NodeMetricsItem>) -> HashMap<String, NodeMetricsItem> {
    let mut map = HashMap::new();
    for item in items {
        let name = item
            .metadata
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        if !name.is_empty() {
            map.insert(name, item);
        }
    }
    map
}

/// Controller dim value for a pod: the first owner reference name, or the
/// fixed fallback for bare pods.
pub fn pod_controller_name(pod: &Pod) -> String {
    pod.metadata
        .owner_references
        .as_ref()
        .and_then(|refs| refs.first())
        .map(|r| r.name.clone())
        .unwrap_or_else(|| NO_CONTROLLER.to_string())
}
