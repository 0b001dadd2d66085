use chrono::{DateTime, Utc};

use super::base::{new_metric_template, MetricTemplate, NODES_METRIC_NAMESPACE};

/// Template for a node-level metric, dimensioned by host only.
pub fn node_resource_metric_template(
    time: DateTime<Utc>,
    metric: &str,
    host: &str,
    value: f64,
) -> MetricTemplate {
    new_metric_template(
        time,
        metric,
        NODES_METRIC_NAMESPACE,
        vec!["host".to_string()],
        vec![host.to_string()],
        value,
    )
}

/// Template for per-device disk usage on a node.
pub fn disk_used_percentage_template(
    time: DateTime<Utc>,
    metric: &str,
    host: &str,
    device: &str,
    value: f64,
) -> MetricTemplate {
    new_metric_template(
        time,
        metric,
        NODES_METRIC_NAMESPACE,
        vec!["host".to_string(), "device".to_string()],
        vec![host.to_string(), device.to_string()],
        value,
    )
}
