//! Shared metrics runtime: config, scheduler and recorder.
//!
//! Construction order is fixed: the scheduler exists before the recorder,
//! and the recorder (with its stores and ledger) exists before any caller
//! can reach it.

use std::sync::Arc;

use tokio::runtime::Handle;

use perfmeter_core::error::Result;
use perfmeter_core::{NoopRecorder, PerformanceMetrics, PerformanceRecorder};

use crate::config::MetricsConfig;
use crate::scheduler::TickScheduler;

#[derive(Clone)]
pub struct MetricsRuntime {
    inner: Arc<MetricsRuntimeInner>,
}

struct MetricsRuntimeInner {
    cfg: MetricsConfig,
    scheduler: Arc<TickScheduler>,
    recorder: Option<Arc<PerformanceMetrics>>,
}

impl MetricsRuntime {
    /// Build the runtime. Returns Result so callers can handle a bad config
    /// instead of panicking.
    pub fn new(cfg: MetricsConfig, handle: Handle) -> Result<Self> {
        cfg.validate()?;

        let scheduler = Arc::new(TickScheduler::new(handle));
        let recorder = if cfg.metrics.enabled {
            let options = cfg.metrics.recorder_options();
            tracing::info!(
                namespace=%options.namespace,
                tick=?options.tick,
                preregister=options.catalogue.is_some(),
                "metrics enabled"
            );
            Some(Arc::new(PerformanceMetrics::new(scheduler.clone(), options)))
        } else {
            tracing::info!("metrics disabled");
            None
        };

        Ok(Self {
            inner: Arc::new(MetricsRuntimeInner { cfg, scheduler, recorder }),
        })
    }

    pub fn cfg(&self) -> &MetricsConfig {
        &self.inner.cfg
    }

    pub fn scheduler(&self) -> Arc<TickScheduler> {
        Arc::clone(&self.inner.scheduler)
    }

    /// The recorder, or `None` when metrics are disabled. `None` is itself a
    /// recorder that ignores writes.
    pub fn recorder(&self) -> Option<Arc<PerformanceMetrics>> {
        self.inner.recorder.clone()
    }

    /// Recorder for dependency injection; the no-op recorder when disabled.
    pub fn dyn_recorder(&self) -> Arc<dyn PerformanceRecorder> {
        match &self.inner.recorder {
            Some(r) => Arc::clone(r) as Arc<dyn PerformanceRecorder>,
            None => Arc::new(NoopRecorder),
        }
    }

    /// Export surface in Prometheus text format.
    pub fn render(&self) -> String {
        self.inner.scheduler.render()
    }
}
