use anyhow::Result;
use kube::Client;
use tracing::info;

mod types;
mod config;
mod parsing;
mod template;
mod emitter;
mod kubernetes;
mod metrics;
mod collector;
mod batch;

use batch::MetricBatch;
use collector::MetricsCollector;
use config::load_config;
use emitter::send_metrics;
use kubernetes::ensure_metrics_available;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cfg = load_config()?;
    info!("namespaces = {:?}", cfg.namespaces);

    let client = Client::try_default().await?;

    // Check metrics API availability early (fail fast if requested)
    if cfg.fail_if_no_metrics {
        ensure_metrics_available(&client, &cfg.namespaces).await?;
    }

    let collector = MetricsCollector::new(&client, &cfg);
    let mut batch = MetricBatch::new(cfg.clone());

    // Collect templates for each namespace
    for ns in &cfg.namespaces {
        info!("Collecting metrics for namespace: {}", ns);

        let workload = collector.collect_workload_metrics(ns).await?;
        batch.add_pod_templates(workload.pod_templates);
        batch.add_container_templates(workload.container_templates);

        let job_templates = collector.collect_job_metrics(ns).await?;
        batch.add_job_templates(job_templates);
    }

    // Collect cluster-wide templates
    info!("Collecting cluster-wide metrics");
    let volume_templates = collector.collect_volume_metrics().await?;
    batch.add_volume_templates(volume_templates);

    let node_templates = collector.collect_node_metrics().await?;
    batch.set_node_templates(node_templates);

    // Log summary
    let summary = batch.summary();
    info!(
        "Collected {} templates (pods {}, containers {}, jobs {}, volumes {}, nodes {})",
        summary.total_templates(),
        summary.pod_template_count,
        summary.container_template_count,
        summary.job_template_count,
        summary.volume_template_count,
        summary.node_template_count,
    );

    // Emit only when there is something to send
    if !batch.is_empty() {
        info!("Sending batch to {}", cfg.metrics_endpoint);
        send_metrics(&cfg.metrics_endpoint, &batch.into_templates()).await?;
    } else {
        info!("No templates collected, skipping emission");
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
