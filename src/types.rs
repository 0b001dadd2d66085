#[derive(Debug, Clone)]
pub struct Config {
    pub namespaces: Vec<String>,
    pub metrics_endpoint: String,
    pub threshold_percent: f64,
    pub pv_threshold_percent: f64,
    pub job_stale_threshold_hours: i64,
    pub fail_if_no_metrics: bool,
}

#[derive(Debug, Default, Clone)]
pub struct ContainerUsageTotals {
    pub cpu_millicores: i64,
    pub memory_bytes: i64,
}

#[derive(Debug, Default, Clone)]
pub struct ContainerRequestTotals {
    pub cpu_millicores: Option<i64>,
    pub memory_bytes: Option<i64>,
}
