use chrono::{DateTime, Utc};

use super::base::{
    format_threshold, new_metric_template, MetricTemplate, CONTAINERS_METRIC_NAMESPACE,
};

fn container_dim_names() -> Vec<String> {
    vec![
        "containerName".to_string(),
        "podName".to_string(),
        "controllerName".to_string(),
        "Kubernetes namespace".to_string(),
        "thresholdPercentage".to_string(),
    ]
}

fn container_dim_values(
    container_name: &str,
    pod_name: &str,
    controller_name: &str,
    kubernetes_namespace: &str,
    threshold_percentage: f64,
) -> Vec<String> {
    vec![
        container_name.to_string(),
        pod_name.to_string(),
        controller_name.to_string(),
        kubernetes_namespace.to_string(),
        format_threshold(threshold_percentage),
    ]
}

/// Template carrying a container's observed utilization percentage.
pub fn container_resource_utilization_template(
    time: DateTime<Utc>,
    metric: &str,
    container_name: &str,
    pod_name: &str,
    controller_name: &str,
    kubernetes_namespace: &str,
    threshold_percentage: f64,
    value: f64,
) -> MetricTemplate {
    new_metric_template(
        time,
        metric,
        CONTAINERS_METRIC_NAMESPACE,
        container_dim_names(),
        container_dim_values(
            container_name,
            pod_name,
            controller_name,
            kubernetes_namespace,
            threshold_percentage,
        ),
        value,
    )
}

/// Template marking that a container crossed its utilization threshold.
/// Same dimensions as the utilization template so the backend can join them.
pub fn container_resource_threshold_violation_template(
    time: DateTime<Utc>,
    metric: &str,
    container_name: &str,
    pod_name: &str,
    controller_name: &str,
    kubernetes_namespace: &str,
    threshold_percentage: f64,
    value: f64,
) -> MetricTemplate {
    new_metric_template(
        time,
        metric,
        CONTAINERS_METRIC_NAMESPACE,
        container_dim_names(),
        container_dim_values(
            container_name,
            pod_name,
            controller_name,
            kubernetes_namespace,
            threshold_percentage,
        ),
        value,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::names::{CPU_EXCEEDED_PERCENTAGE, CPU_THRESHOLD_VIOLATED};

    #[test]
    fn test_container_utilization_template_dims() {
        let template = container_resource_utilization_template(
            Utc::now(),
            CPU_EXCEEDED_PERCENTAGE,
            "app",
            "web-abc123",
            "web",
            "default",
            95.0,
            97.3,
        );

        assert_eq!(
            template.data.base_data.namespace,
            "insights.container/containers"
        );
        assert_eq!(
            template.data.base_data.dim_names,
            vec![
                "containerName",
                "podName",
                "controllerName",
                "Kubernetes namespace",
                "thresholdPercentage"
            ]
        );
        assert_eq!(
            template.data.base_data.series[0].dim_values,
            vec!["app", "web-abc123", "web", "default", "95.000000"]
        );
        assert_eq!(template.data.base_data.series[0].max, 97.3);
    }

    #[test]
    fn test_violation_template_shares_dims_with_utilization() {
        let time = Utc::now();
        let utilization = container_resource_utilization_template(
            time,
            CPU_EXCEEDED_PERCENTAGE,
            "app",
            "web-abc123",
            "web",
            "default",
            95.0,
            97.3,
        );
        let violation = container_resource_threshold_violation_template(
            time,
            CPU_THRESHOLD_VIOLATED,
            "app",
            "web-abc123",
            "web",
            "default",
            95.0,
            1.0,
        );

        assert_eq!(
            utilization.data.base_data.dim_names,
            violation.data.base_data.dim_names
        );
        assert_eq!(
            utilization.data.base_data.series[0].dim_values,
            violation.data.base_data.series[0].dim_values
        );
        assert_eq!(violation.data.base_data.series[0].sum, 1.0);
    }
}
