use chrono::{DateTime, Utc};

use super::base::{
    format_threshold, new_metric_template, MetricTemplate, PERSISTENT_VOLUMES_METRIC_NAMESPACE,
};

fn pv_dim_names() -> Vec<String> {
    vec![
        "podName".to_string(),
        "node".to_string(),
        "kubernetesNamespace".to_string(),
        "volumeName".to_string(),
        "thresholdPercentage".to_string(),
    ]
}

fn pv_dim_values(
    pod_name: &str,
    node_name: &str,
    kubernetes_namespace: &str,
    volume_name: &str,
    threshold_percentage: f64,
) -> Vec<String> {
    vec![
        pod_name.to_string(),
        node_name.to_string(),
        kubernetes_namespace.to_string(),
        volume_name.to_string(),
        format_threshold(threshold_percentage),
    ]
}

/// Template carrying a persistent volume's observed usage percentage.
pub fn pv_resource_utilization_template(
    time: DateTime<Utc>,
    metric: &str,
    pod_name: &str,
    node_name: &str,
    kubernetes_namespace: &str,
    volume_name: &str,
    threshold_percentage: f64,
    value: f64,
) -> MetricTemplate {
    new_metric_template(
        time,
        metric,
        PERSISTENT_VOLUMES_METRIC_NAMESPACE,
        pv_dim_names(),
        pv_dim_values(
            pod_name,
            node_name,
            kubernetes_namespace,
            volume_name,
            threshold_percentage,
        ),
        value,
    )
}

/// Template marking that a persistent volume crossed its usage threshold.
pub fn pv_resource_threshold_violation_template(
    time: DateTime<Utc>,
    metric: &str,
    pod_name: &str,
    node_name: &str,
    kubernetes_namespace: &str,
    volume_name: &str,
    threshold_percentage: f64,
    value: f64,
) -> MetricTemplate {
    new_metric_template(
        time,
        metric,
        PERSISTENT_VOLUMES_METRIC_NAMESPACE,
        pv_dim_names(),
        pv_dim_values(
            pod_name,
            node_name,
            kubernetes_namespace,
            volume_name,
            threshold_percentage,
        ),
        value,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::names::PV_USAGE_EXCEEDED_PERCENTAGE;

    #[test]
    fn test_pv_utilization_template_dims() {
        let template = pv_resource_utilization_template(
            Utc::now(),
            PV_USAGE_EXCEEDED_PERCENTAGE,
            "db-0",
            "node-1",
            "default",
            "data",
            60.0,
            71.2,
        );

        assert_eq!(
            template.data.base_data.namespace,
            "insights.container/persistentvolumes"
        );
        assert_eq!(
            template.data.base_data.dim_names,
            vec![
                "podName",
                "node",
                "kubernetesNamespace",
                "volumeName",
                "thresholdPercentage"
            ]
        );
        assert_eq!(
            template.data.base_data.series[0].dim_values,
            vec!["db-0", "node-1", "default", "data", "60.000000"]
        );

        let series = &template.data.base_data.series[0];
        assert_eq!(series.min, 71.2);
        assert_eq!(series.max, 71.2);
        assert_eq!(series.sum, 71.2);
        assert_eq!(series.count, 1);
    }
}
