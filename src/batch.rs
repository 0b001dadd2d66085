use crate::template::MetricTemplate;
use crate::types::Config;

/// Accumulated templates for one emission pass, grouped by area
pub struct MetricBatch {
    pub config: Config,
    pub pod_templates: Vec<MetricTemplate>,
    pub container_templates: Vec<MetricTemplate>,
    pub job_templates: Vec<MetricTemplate>,
    pub volume_templates: Vec<MetricTemplate>,
    pub node_templates: Vec<MetricTemplate>,
}

impl MetricBatch {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pod_templates: Vec::new(),
            container_templates: Vec::new(),
            job_templates: Vec::new(),
            volume_templates: Vec::new(),
            node_templates: Vec::new(),
        }
    }

    pub fn add_pod_templates(&mut self, templates: Vec<MetricTemplate>) {
        self.pod_templates.extend(templates);
    }

    pub fn add_container_templates(&mut self, templates: Vec<MetricTemplate>) {
        self.container_templates.extend(templates);
    }

    pub fn add_job_templates(&mut self, templates: Vec<MetricTemplate>) {
        self.job_templates.extend(templates);
    }

    pub fn add_volume_templates(&mut self, templates: Vec<MetricTemplate>) {
        self.volume_templates.extend(templates);
    }

    pub fn set_node_templates(&mut self, templates: Vec<MetricTemplate>) {
        self.node_templates = templates;
    }

    pub fn is_empty(&self) -> bool {
        self.summary().total_templates() == 0
    }

    /// Flatten the batch into emission order: workload areas first, then
    /// cluster-wide areas
    pub fn into_templates(self) -> Vec<MetricTemplate> {
        let mut templates = self.pod_templates;
        templates.extend(self.container_templates);
        templates.extend(self.job_templates);
        templates.extend(self.volume_templates);
        templates.extend(self.node_templates);
        templates
    }

    /// Per-area counts for logging before emission
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            pod_template_count: self.pod_templates.len(),
            container_template_count: self.container_templates.len(),
            job_template_count: self.job_templates.len(),
            volume_template_count: self.volume_templates.len(),
            node_template_count: self.node_templates.len(),
        }
    }
}

pub struct BatchSummary {
    pub pod_template_count: usize,
    pub container_template_count: usize,
    pub job_template_count: usize,
    pub volume_template_count: usize,
    pub node_template_count: usize,
}

impl BatchSummary {
    pub fn total_templates(&self) -> usize {
        self.pod_template_count
            + self.container_template_count
            + self.job_template_count
            + self.volume_template_count
            + self.node_template_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::names::POD_READY_PERCENTAGE;
    use crate::template::pods::pod_metric_template;
    use chrono::Utc;

    fn create_test_config() -> Config {
        Config {
            namespaces: vec!["default".to_string()],
            metrics_endpoint: "https://ingest.example.com/metrics".to_string(),
            threshold_percent: 95.0,
            pv_threshold_percent: 60.0,
            job_stale_threshold_hours: 6,
            fail_if_no_metrics: true,
        }
    }

    #[test]
    fn test_empty_batch() {
        let batch = MetricBatch::new(create_test_config());
        assert!(batch.is_empty());
        assert_eq!(batch.summary().total_templates(), 0);
        assert!(batch.into_templates().is_empty());
    }

    #[test]
    fn test_batch_accumulates_across_namespaces() {
        let mut batch = MetricBatch::new(create_test_config());

        batch.add_pod_templates(vec![pod_metric_template(
            Utc::now(),
            POD_READY_PERCENTAGE,
            "web",
            "default",
            100.0,
        )]);
        batch.add_pod_templates(vec![pod_metric_template(
            Utc::now(),
            POD_READY_PERCENTAGE,
            "api",
            "staging",
            50.0,
        )]);

        assert!(!batch.is_empty());
        let summary = batch.summary();
        assert_eq!(summary.pod_template_count, 2);
        assert_eq!(summary.total_templates(), 2);
        assert_eq!(batch.into_templates().len(), 2);
    }

    #[test]
    fn test_into_templates_ordering() {
        let mut batch = MetricBatch::new(create_test_config());
        let now = Utc::now();

        batch.set_node_templates(vec![pod_metric_template(now, "c", "x", "default", 1.0)]);
        batch.add_pod_templates(vec![pod_metric_template(now, "a", "x", "default", 1.0)]);
        batch.add_job_templates(vec![pod_metric_template(now, "b", "x", "default", 1.0)]);

        let metrics: Vec<String> = batch
            .into_templates()
            .into_iter()
            .map(|t| t.data.base_data.metric)
            .collect();
        assert_eq!(metrics, vec!["a", "b", "c"]);
    }
}
