use std::time::Duration;

use serde::Deserialize;
use perfmeter_core::error::{MetricsError, Result};
use perfmeter_core::source::{validate_tick, APPLICATION_METRICS_TICK, DEFAULT_NAMESPACE};
use perfmeter_core::{Catalogue, RecorderOptions};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    pub version: u32,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::UnsupportedVersion);
        }

        self.metrics.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// 0 selects the default application tick.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    #[serde(default = "default_preregister")]
    pub preregister: bool,

    /// Overrides the built-in catalogue when present.
    #[serde(default)]
    pub catalogue: Option<Catalogue>,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            namespace: default_namespace(),
            tick_ms: default_tick_ms(),
            preregister: default_preregister(),
            catalogue: None,
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if self.namespace.trim().is_empty() {
            return Err(MetricsError::BadConfig("metrics.namespace must not be empty".into()));
        }
        if self.tick_ms != 0 && !(1000..=3_600_000).contains(&self.tick_ms) {
            return Err(MetricsError::BadConfig(
                "metrics.tick_ms must be 0 or between 1000 and 3600000".into(),
            ));
        }
        if self.catalogue.is_some() && !self.preregister {
            return Err(MetricsError::BadConfig(
                "metrics.catalogue requires metrics.preregister".into(),
            ));
        }
        if let Some(c) = &self.catalogue {
            let mut names = c.counters.iter().chain(&c.gauges).chain(&c.durations);
            if names.any(|n| n.is_empty()) {
                return Err(MetricsError::BadConfig(
                    "metrics.catalogue names must not be empty".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        validate_tick(Duration::from_millis(self.tick_ms), APPLICATION_METRICS_TICK)
    }

    /// Catalogue to pre-register, if pre-registration is on.
    pub fn catalogue(&self) -> Option<Catalogue> {
        if !self.preregister {
            return None;
        }
        Some(self.catalogue.clone().unwrap_or_else(Catalogue::builtin))
    }

    pub fn recorder_options(&self) -> RecorderOptions {
        RecorderOptions {
            namespace: self.namespace.clone(),
            tick: self.tick(),
            catalogue: self.catalogue(),
        }
    }
}

fn default_enabled() -> bool {
    true
}
fn default_namespace() -> String {
    DEFAULT_NAMESPACE.into()
}
fn default_tick_ms() -> u64 {
    APPLICATION_METRICS_TICK.as_millis() as u64
}
fn default_preregister() -> bool {
    true
}
