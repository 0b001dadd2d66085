use anyhow::Result;
use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::Node;
use kube::{api::ListParams, Api, Client};
use tracing::warn;

use super::base::{get_node_stats_summary, PodStats};
use crate::template::names::{PV_USAGE_EXCEEDED_PERCENTAGE, PV_USAGE_THRESHOLD_VIOLATED};
use crate::template::volumes::{
    pv_resource_threshold_violation_template, pv_resource_utilization_template,
};
use crate::template::MetricTemplate;

/// Collect utilization and violation templates for PVC-backed volumes whose
/// usage exceeds the threshold. Volume stats live in the per-node kubelet
/// summaries, so this walks every node and filters to the target namespaces.
pub async fn collect_volume_templates(
    client: &Client,
    target_namespaces: &[String],
    pv_threshold_percent: f64,
    now: DateTime<Utc>,
) -> Result<Vec<MetricTemplate>> {
    let node_api: Api<Node> = Api::all(client.clone());
    let nodes = node_api.list(&ListParams::default()).await?;
    let mut templates = Vec::new();

    for node in nodes.items {
        let node_name = match node.metadata.name.as_ref() {
            Some(n) => n.clone(),
            None => continue,
        };

        // One unreachable kubelet must not sink the whole collection pass
        let summary = match get_node_stats_summary(client, &node_name).await {
            Ok(s) => s,
            Err(e) => {
                warn!("stats summary unavailable for node {}: {}", node_name, e);
                continue;
            }
        };

        templates.extend(build_volume_templates(
            &node_name,
            &summary.pods,
            target_namespaces,
            pv_threshold_percent,
            now,
        ));
    }

    Ok(templates)
}

pub fn build_volume_templates(
    node_name: &str,
    pod_stats: &[PodStats],
    target_namespaces: &[String],
    pv_threshold_percent: f64,
    now: DateTime<Utc>,
) -> Vec<MetricTemplate> {
    let mut templates = Vec::new();

    for stats in pod_stats {
        if !target_namespaces.contains(&stats.pod_ref.namespace) {
            continue;
        }

        for volume in &stats.volume {
            // Only PVC-backed volumes count; ephemeral volumes are noise here
            let pvc = match volume.pvc_ref.as_ref() {
                Some(p) => p,
                None => continue,
            };
            let (used, capacity) = match (volume.used_bytes, volume.capacity_bytes) {
                (Some(u), Some(c)) if c > 0 => (u, c),
                _ => continue,
            };

            let used_pct = (used as f64 / capacity as f64) * 100.0;
            if used_pct > pv_threshold_percent {
                templates.push(pv_resource_utilization_template(
                    now,
                    PV_USAGE_EXCEEDED_PERCENTAGE,
                    &stats.pod_ref.name,
                    node_name,
                    &stats.pod_ref.namespace,
                    &pvc.name,
                    pv_threshold_percent,
                    used_pct,
                ));
                templates.push(pv_resource_threshold_violation_template(
                    now,
                    PV_USAGE_THRESHOLD_VIOLATED,
                    &stats.pod_ref.name,
                    node_name,
                    &stats.pod_ref.namespace,
                    &pvc.name,
                    pv_threshold_percent,
                    1.0,
                ));
            }
        }
    }

    templates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::base::{PodReference, PvcReference, VolumeStats};

    fn pod_stats(pod: &str, namespace: &str, volumes: Vec<VolumeStats>) -> PodStats {
        PodStats {
            pod_ref: PodReference {
                name: pod.to_string(),
                namespace: namespace.to_string(),
            },
            volume: volumes,
        }
    }

    fn pvc_volume(name: &str, pvc: &str, used: u64, capacity: u64) -> VolumeStats {
        VolumeStats {
            name: name.to_string(),
            used_bytes: Some(used),
            capacity_bytes: Some(capacity),
            pvc_ref: Some(PvcReference {
                name: pvc.to_string(),
            }),
        }
    }

    #[test]
    fn test_volume_over_threshold_emits_pair() {
        let stats = vec![pod_stats(
            "db-0",
            "default",
            vec![pvc_volume("data", "data-db-0", 75, 100)],
        )];

        let templates =
            build_volume_templates("node-1", &stats, &["default".to_string()], 60.0, Utc::now());
        assert_eq!(templates.len(), 2);

        let utilization = &templates[0].data.base_data;
        assert_eq!(utilization.metric, "pvUsageExceededPercentage");
        assert_eq!(
            utilization.series[0].dim_values,
            vec!["db-0", "node-1", "default", "data-db-0", "60.000000"]
        );
        assert_eq!(utilization.series[0].sum, 75.0);

        let violation = &templates[1].data.base_data;
        assert_eq!(violation.metric, "pvUsageThresholdViolated");
        assert_eq!(violation.series[0].sum, 1.0);
    }

    #[test]
    fn test_non_target_namespace_filtered_out() {
        let stats = vec![pod_stats(
            "db-0",
            "other",
            vec![pvc_volume("data", "data-db-0", 90, 100)],
        )];

        let templates =
            build_volume_templates("node-1", &stats, &["default".to_string()], 60.0, Utc::now());
        assert!(templates.is_empty());
    }

    #[test]
    fn test_ephemeral_and_partial_volumes_skipped() {
        let stats = vec![pod_stats(
            "db-0",
            "default",
            vec![
                // no pvcRef
                VolumeStats {
                    name: "scratch".to_string(),
                    used_bytes: Some(99),
                    capacity_bytes: Some(100),
                    pvc_ref: None,
                },
                // missing capacity
                VolumeStats {
                    name: "data".to_string(),
                    used_bytes: Some(99),
                    capacity_bytes: None,
                    pvc_ref: Some(PvcReference {
                        name: "data-db-0".to_string(),
                    }),
                },
                // under threshold
                pvc_volume("logs", "logs-db-0", 10, 100),
            ],
        )];

        let templates =
            build_volume_templates("node-1", &stats, &["default".to_string()], 60.0, Utc::now());
        assert!(templates.is_empty());
    }
}
