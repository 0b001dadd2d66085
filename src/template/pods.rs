use chrono::{DateTime, Utc};

use super::base::{new_metric_template, MetricTemplate, PODS_METRIC_NAMESPACE};

/// Template for a pod-level metric, dimensioned by controller and
/// Kubernetes namespace.
pub fn pod_metric_template(
    time: DateTime<Utc>,
    metric: &str,
    controller_name: &str,
    kubernetes_namespace: &str,
    value: f64,
) -> MetricTemplate {
    new_metric_template(
        time,
        metric,
        PODS_METRIC_NAMESPACE,
        vec![
            "controllerName".to_string(),
            "Kubernetes namespace".to_string(),
        ],
        vec![
            controller_name.to_string(),
            kubernetes_namespace.to_string(),
        ],
        value,
    )
}

/// Template for metrics over jobs that finished longer than `older_than_hours`
/// ago, dimensioned like the pod template plus the age cutoff.
pub fn stable_job_metric_template(
    time: DateTime<Utc>,
    metric: &str,
    controller_name: &str,
    kubernetes_namespace: &str,
    older_than_hours: i64,
    value: f64,
) -> MetricTemplate {
    new_metric_template(
        time,
        metric,
        PODS_METRIC_NAMESPACE,
        vec![
            "controllerName".to_string(),
            "Kubernetes namespace".to_string(),
            "olderThanHours".to_string(),
        ],
        vec![
            controller_name.to_string(),
            kubernetes_namespace.to_string(),
            older_than_hours.to_string(),
        ],
        value,
    )
}
