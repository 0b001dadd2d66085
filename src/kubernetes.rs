use anyhow::{anyhow, Result};
use chrono::Utc;
use kube::Client;

use crate::metrics::{build_pod_templates, collect_stale_job_templates, list_pod_metrics_http};
use crate::template::MetricTemplate;
use crate::types::Config;

/// Probe the metrics API through the first configured namespace; used to
/// fail fast at startup when FAIL_IF_NO_METRICS is set.
pub async fn ensure_metrics_available(client: &Client, namespaces: &[String]) -> Result<()> {
    let ns = namespaces.first().ok_or_else(|| anyhow!("No namespaces provided"))?;
    let _ = list_pod_metrics_http(client, ns).await?;
    Ok(())
}

/// Convenience wrapper collecting the namespace-scoped templates in one call
pub async fn collect_namespace(
    client: &Client,
    namespace: &str,
    cfg: &Config,
) -> Result<Vec<MetricTemplate>> {
    let pods = {
        use k8s_openapi::api::core::v1::Pod;
        use kube::{api::ListParams, Api};
        let pod_api: Api<Pod> = Api::namespaced(client.clone(), namespace);
        pod_api.list(&ListParams::default()).await?.items
    };

    let now = Utc::now();
    let mut templates = build_pod_templates(namespace, &pods, now);
    templates.extend(
        collect_stale_job_templates(client, namespace, cfg.job_stale_threshold_hours, now).await?,
    );
    Ok(templates)
}
