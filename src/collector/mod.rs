use anyhow::Result;
use chrono::Utc;
use kube::Client;

use crate::metrics;
use crate::template::MetricTemplate;
use crate::types::Config;

/// Collector structure that groups related template collection
pub struct MetricsCollector<'a> {
    client: &'a Client,
    config: &'a Config,
}

/// Pod and container templates for one namespace, collected off a single
/// pod listing
pub struct WorkloadTemplates {
    pub pod_templates: Vec<MetricTemplate>,
    pub container_templates: Vec<MetricTemplate>,
}

impl<'a> MetricsCollector<'a> {
    pub fn new(client: &'a Client, config: &'a Config) -> Self {
        Self { client, config }
    }

    /// Collect pod and container templates for a namespace
    pub async fn collect_workload_metrics(&self, namespace: &str) -> Result<WorkloadTemplates> {
        // List pods once, shared by the pod and container collectors
        let pods = {
            use k8s_openapi::api::core::v1::Pod;
            use kube::{api::ListParams, Api};
            let pod_api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
            pod_api.list(&ListParams::default()).await?.items
        };

        let now = Utc::now();
        let pod_templates = metrics::pods::build_pod_templates(namespace, &pods, now);
        let container_templates = metrics::containers::collect_container_templates(
            self.client,
            namespace,
            &pods,
            self.config.threshold_percent,
            now,
        )
        .await?;

        Ok(WorkloadTemplates {
            pod_templates,
            container_templates,
        })
    }

    /// Collect stale completed job templates for a namespace
    pub async fn collect_job_metrics(&self, namespace: &str) -> Result<Vec<MetricTemplate>> {
        metrics::collect_stale_job_templates(
            self.client,
            namespace,
            self.config.job_stale_threshold_hours,
            Utc::now(),
        )
        .await
    }

    /// Collect persistent volume templates across the cluster, filtered to
    /// the configured namespaces
    pub async fn collect_volume_metrics(&self) -> Result<Vec<MetricTemplate>> {
        metrics::collect_volume_templates(
            self.client,
            &self.config.namespaces,
            self.config.pv_threshold_percent,
            Utc::now(),
        )
        .await
    }

    /// Collect cluster-wide node templates
    pub async fn collect_node_metrics(&self) -> Result<Vec<MetricTemplate>> {
        metrics::collect_node_templates(self.client, Utc::now()).await
    }
}
