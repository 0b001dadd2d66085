// Metric collection modules, one per resource kind
pub mod base;
pub mod containers;
pub mod jobs;
pub mod nodes;
pub mod pods;
pub mod volumes;

// Re-export commonly used items
pub use base::{list_node_metrics_http, list_pod_metrics_http, pod_controller_name};
pub use containers::collect_container_templates;
pub use jobs::collect_stale_job_templates;
pub use nodes::collect_node_templates;
pub use pods::build_pod_templates;
pub use volumes::collect_volume_templates;
