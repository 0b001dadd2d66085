// Metric template factories, one module per resource kind
pub mod base;
pub mod containers;
pub mod names;
pub mod nodes;
pub mod pods;
pub mod volumes;

// Re-export commonly used items
pub use base::{
    format_threshold, new_metric_template, MetricBaseData, MetricData, MetricSeries,
    MetricTemplate, CONTAINERS_METRIC_NAMESPACE, NODES_METRIC_NAMESPACE,
    PERSISTENT_VOLUMES_METRIC_NAMESPACE, PODS_METRIC_NAMESPACE,
};
pub use containers::{
    container_resource_threshold_violation_template, container_resource_utilization_template,
};
pub use nodes::{disk_used_percentage_template, node_resource_metric_template};
pub use pods::{pod_metric_template, stable_job_metric_template};
pub use volumes::{pv_resource_threshold_violation_template, pv_resource_utilization_template};
