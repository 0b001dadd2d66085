use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use crate::types::Config;

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    let namespaces = env.get_var("NAMESPACES").unwrap_or_default();
    let namespaces: Vec<String> = namespaces
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if namespaces.is_empty() {
        return Err(anyhow!("NAMESPACES env var must be set (comma-separated)"));
    }

    let metrics_endpoint = env.get_var("METRICS_ENDPOINT")
        .ok_or_else(|| anyhow!("METRICS_ENDPOINT must be provided via Secret env"))?;

    let threshold_percent: f64 = env.get_var("THRESHOLD_PERCENT")
        .unwrap_or_else(|| "95".to_string())
        .parse()
        .context("Invalid THRESHOLD_PERCENT")?;

    let pv_threshold_percent: f64 = env.get_var("PV_THRESHOLD_PERCENT")
        .unwrap_or_else(|| "60".to_string())
        .parse()
        .context("Invalid PV_THRESHOLD_PERCENT")?;

    let job_stale_threshold_hours: i64 = env.get_var("JOB_STALE_THRESHOLD_HOURS")
        .unwrap_or_else(|| "6".to_string())
        .parse()
        .unwrap_or(6);

    let fail_if_no_metrics = env.get_var("FAIL_IF_NO_METRICS")
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(true); // default to true per requirement

    Ok(Config {
        namespaces,
        metrics_endpoint,
        threshold_percent,
        pv_threshold_percent,
        job_stale_threshold_hours,
        fail_if_no_metrics,
    })
}
