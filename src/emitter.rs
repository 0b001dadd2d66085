use anyhow::{Context, Result};
use thiserror::Error;
use tracing::error;

use crate::template::MetricTemplate;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("metrics endpoint returned {status}: {body}")]
    EndpointRejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Serialize a batch as newline-delimited JSON, one template document per
/// line, the framing the ingestion endpoint expects.
pub fn to_request_body(templates: &[MetricTemplate]) -> Result<String> {
    let mut lines = Vec::with_capacity(templates.len());
    for template in templates {
        lines.push(serde_json::to_string(template).context("serialize metric template")?);
    }
    Ok(lines.join("\n"))
}

pub async fn send_metrics(endpoint: &str, templates: &[MetricTemplate]) -> Result<()> {
    if templates.is_empty() {
        return Ok(());
    }

    let body = to_request_body(templates)?;
    let client = reqwest::Client::new();
    let res = client
        .post(endpoint)
        .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
        .body(body)
        .send()
        .await
        .context("Failed to send metrics request")?;

    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        error!("metrics endpoint rejected batch: {} - {}", status, body);
        return Err(EmitError::EndpointRejected { status, body }.into());
    }
    Ok(())
}
