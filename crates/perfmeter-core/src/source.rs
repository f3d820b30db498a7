//! Pull-based sources and the scheduler boundary.
//!
//! A [`Source`] is handed to a [`SourceScheduler`] once per metric name. The
//! scheduler owns the sampling cadence and the export surface; this crate
//! only ever hands out read-only closures.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;

/// Zero-argument callback returning the current value of a metric.
pub type Source = Arc<dyn Fn() -> f64 + Send + Sync>;

/// Default sampling tick for application metrics.
pub const APPLICATION_METRICS_TICK: Duration = Duration::from_secs(60);

/// Namespace prefixed to every name registered by the performance recorder.
pub const DEFAULT_NAMESPACE: &str = "performance";

/// Periodic sampler that polls registered sources and publishes them.
///
/// The recorder holds no lock while calling `observe_source`, so an
/// implementation may sample the source or write to the same recorder from
/// inside the call. Sampling takes only the metric's read lock.
pub trait SourceScheduler: Send + Sync {
    /// Start sampling `source` every `tick` under `name`.
    fn observe_source(&self, name: &str, source: Source, tick: Duration) -> Result<()>;
}

/// Wrap a closure as a [`Source`].
pub fn source<F>(f: F) -> Source
where
    F: Fn() -> f64 + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Name under which a metric is exposed to the scheduler.
pub fn qualified_name(namespace: &str, name: &str) -> String {
    format!("{namespace}_{name}")
}

/// Pick `tick` when positive, otherwise `default`.
pub fn validate_tick(tick: Duration, default: Duration) -> Duration {
    if tick.is_zero() {
        default
    } else {
        tick
    }
}
