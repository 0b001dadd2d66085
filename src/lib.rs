// Public modules
pub mod types;
pub mod config;
pub mod parsing;
pub mod template;
pub mod emitter;
pub mod kubernetes;
pub mod metrics;
pub mod collector;
pub mod batch;

// Re-export commonly used items
pub use types::*;
pub use config::{load_config, load_config_with_env, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use parsing::{parse_cpu_to_millicores, parse_memory_to_bytes, compute_utilization_percentages};
pub use template::*;
pub use emitter::{send_metrics, to_request_body, EmitError};
pub use kubernetes::{collect_namespace, ensure_metrics_available};
pub use collector::{MetricsCollector, WorkloadTemplates};
pub use batch::{BatchSummary, MetricBatch};
