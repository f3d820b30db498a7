//! Recorder facade.
//!
//! Callers depend on [`PerformanceRecorder`] and never branch on whether
//! metrics are enabled: a disabled recorder is `None` (every `Option<R>` is a
//! recorder) or an explicit [`NoopRecorder`].

mod noop;
mod performance;

use std::sync::Arc;
use std::time::Duration;

pub use noop::NoopRecorder;
pub use performance::{PerformanceMetrics, RecorderOptions};

/// Capability set shared by every recorder.
pub trait PerformanceRecorder: Send + Sync {
    /// Add `amount` to a counter.
    fn increment_counter(&self, name: &str, amount: f64);
    /// Record a duration, in seconds, into a histogram.
    fn record_duration(&self, name: &str, duration: Duration);
    /// Overwrite a gauge.
    fn set_gauge(&self, name: &str, value: f64);
    /// Current counter value, 0 for unknown names.
    fn counter_value(&self, name: &str) -> f64;
    /// Current gauge value, 0 for unknown names.
    fn gauge_value(&self, name: &str) -> f64;
}

impl<R: PerformanceRecorder + ?Sized> PerformanceRecorder for Arc<R> {
    fn increment_counter(&self, name: &str, amount: f64) {
        (**self).increment_counter(name, amount)
    }
    fn record_duration(&self, name: &str, duration: Duration) {
        (**self).record_duration(name, duration)
    }
    fn set_gauge(&self, name: &str, value: f64) {
        (**self).set_gauge(name, value)
    }
    fn counter_value(&self, name: &str) -> f64 {
        (**self).counter_value(name)
    }
    fn gauge_value(&self, name: &str) -> f64 {
        (**self).gauge_value(name)
    }
}

impl<R: PerformanceRecorder> PerformanceRecorder for Option<R> {
    fn increment_counter(&self, name: &str, amount: f64) {
        if let Some(r) = self {
            r.increment_counter(name, amount);
        }
    }
    fn record_duration(&self, name: &str, duration: Duration) {
        if let Some(r) = self {
            r.record_duration(name, duration);
        }
    }
    fn set_gauge(&self, name: &str, value: f64) {
        if let Some(r) = self {
            r.set_gauge(name, value);
        }
    }
    fn counter_value(&self, name: &str) -> f64 {
        self.as_ref().map_or(0.0, |r| r.counter_value(name))
    }
    fn gauge_value(&self, name: &str) -> f64 {
        self.as_ref().map_or(0.0, |r| r.gauge_value(name))
    }
}
