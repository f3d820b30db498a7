//! Reference tick scheduler and export surface.
//!
//! Every observed source gets its own tokio task that samples it on an
//! interval and stores the latest value as `f64` bits in an atomic. The
//! export surface is the set of latest values, rendered as Prometheus gauges.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use perfmeter_core::error::{MetricsError, Result};
use perfmeter_core::{Source, SourceScheduler};

struct Sample {
    bits: AtomicU64,
}

impl Sample {
    fn new() -> Self {
        Self { bits: AtomicU64::new(0f64.to_bits()) }
    }
    fn store(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }
    fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

struct Observed {
    sample: Arc<Sample>,
    tick: Duration,
    task: JoinHandle<()>,
}

/// Samples registered sources on the given runtime.
pub struct TickScheduler {
    handle: Handle,
    observed: DashMap<String, Observed>,
}

impl TickScheduler {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            observed: DashMap::new(),
        }
    }

    /// Latest sampled value for `name`.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.observed.get(name).map(|o| o.sample.load())
    }

    pub fn tick_of(&self, name: &str) -> Option<Duration> {
        self.observed.get(name).map(|o| o.tick)
    }

    pub fn is_observed(&self, name: &str) -> bool {
        self.observed.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Sorted `(name, latest value)` pairs.
    pub fn snapshot(&self) -> Vec<(String, f64)> {
        let mut out: Vec<(String, f64)> = self
            .observed
            .iter()
            .map(|r| (r.key().clone(), r.value().sample.load()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.snapshot() {
            let _ = writeln!(out, "# TYPE {} gauge", name);
            let _ = writeln!(out, "{} {}", name, format_value(value));
        }
        out
    }

    /// Stop every sampling task. Latest values stay readable.
    pub fn shutdown(&self) {
        for r in self.observed.iter() {
            r.value().task.abort();
        }
    }
}

/// Exposition-format rendering of a sample value.
fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v == f64::INFINITY {
        "+Inf".into()
    } else if v == f64::NEG_INFINITY {
        "-Inf".into()
    } else {
        v.to_string()
    }
}

impl SourceScheduler for TickScheduler {
    fn observe_source(&self, name: &str, source: Source, tick: Duration) -> Result<()> {
        if tick.is_zero() {
            return Err(MetricsError::Scheduler(format!("zero tick for {name}")));
        }

        match self.observed.entry(name.to_string()) {
            Entry::Occupied(_) => Err(MetricsError::DuplicateSource(name.to_string())),
            Entry::Vacant(slot) => {
                let sample = Arc::new(Sample::new());
                let target = Arc::clone(&sample);
                let task = self.handle.spawn(async move {
                    let mut interval = tokio::time::interval(tick);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    loop {
                        interval.tick().await;
                        target.store(source());
                    }
                });
                slot.insert(Observed { sample, tick, task });

                tracing::info!(metric=%name, ?tick, "observing source");
                Ok(())
            }
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
