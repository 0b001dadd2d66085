use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// Metric namespaces as the ingestion backend expects them. The nodes
// namespace is capitalized differently from the others; the backend matches
// it case-sensitively.
pub const PODS_METRIC_NAMESPACE: &str = "insights.container/pods";
pub const CONTAINERS_METRIC_NAMESPACE: &str = "insights.container/containers";
pub const PERSISTENT_VOLUMES_METRIC_NAMESPACE: &str = "insights.container/persistentvolumes";
pub const NODES_METRIC_NAMESPACE: &str = "Insights.Container/nodes";

/// One metric observation in the envelope the ingestion endpoint consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTemplate {
    pub time: String,
    pub data: MetricData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricData {
    pub base_data: MetricBaseData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBaseData {
    pub metric: String,
    pub namespace: String,
    pub dim_names: Vec<String>,
    pub series: Vec<MetricSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSeries {
    pub dim_values: Vec<String>,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: i64,
}

/// Build a single-sample template: min, max and sum all carry the observed
/// value and the count is 1. Dimension names and values must line up; the
/// per-kind wrappers guarantee that by construction.
pub fn new_metric_template(
    time: DateTime<Utc>,
    metric: &str,
    namespace: &str,
    dim_names: Vec<String>,
    dim_values: Vec<String>,
    value: f64,
) -> MetricTemplate {
    MetricTemplate {
        time: time.to_rfc3339_opts(SecondsFormat::Millis, true),
        data: MetricData {
            base_data: MetricBaseData {
                metric: metric.to_string(),
                namespace: namespace.to_string(),
                dim_names,
                series: vec![MetricSeries {
                    dim_values,
                    min: value,
                    max: value,
                    sum: value,
                    count: 1,
                }],
            },
        },
    }
}

/// Render a threshold percentage dim value with six fractional digits,
/// e.g. 95.0 -> "95.000000". The backend treats the dim as an opaque string,
/// so the rendering has to be stable.
pub fn format_threshold(threshold_percentage: f64) -> String {
    format!("{:.6}", threshold_percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_metric_template_single_sample() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let template = new_metric_template(
            time,
            "podReadyPercentage",
            PODS_METRIC_NAMESPACE,
            vec!["controllerName".to_string(), "Kubernetes namespace".to_string()],
            vec!["web".to_string(), "default".to_string()],
            87.5,
        );

        assert_eq!(template.time, "2024-05-01T12:30:00.000Z");
        assert_eq!(template.data.base_data.metric, "podReadyPercentage");
        assert_eq!(template.data.base_data.namespace, "insights.container/pods");
        assert_eq!(template.data.base_data.series.len(), 1);

        let series = &template.data.base_data.series[0];
        assert_eq!(series.min, 87.5);
        assert_eq!(series.max, 87.5);
        assert_eq!(series.sum, 87.5);
        assert_eq!(series.count, 1);
        assert_eq!(
            template.data.base_data.dim_names.len(),
            series.dim_values.len()
        );
    }

    #[test]
    fn test_template_json_field_names() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let template = new_metric_template(
            time,
            "cpuUsageMillicores",
            NODES_METRIC_NAMESPACE,
            vec!["host".to_string()],
            vec!["node-1".to_string()],
            1500.0,
        );

        let json = serde_json::to_value(&template).unwrap();
        let base_data = &json["data"]["baseData"];
        assert_eq!(base_data["metric"], "cpuUsageMillicores");
        assert_eq!(base_data["namespace"], "Insights.Container/nodes");
        assert_eq!(base_data["dimNames"][0], "host");
        assert_eq!(base_data["series"][0]["dimValues"][0], "node-1");
        assert_eq!(base_data["series"][0]["min"], 1500.0);
        assert_eq!(base_data["series"][0]["count"], 1);
    }

    #[test]
    fn test_format_threshold() {
        assert_eq!(format_threshold(95.0), "95.000000");
        assert_eq!(format_threshold(60.5), "60.500000");
        assert_eq!(format_threshold(0.0), "0.000000");
    }
}
