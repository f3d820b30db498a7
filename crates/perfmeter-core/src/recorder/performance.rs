use std::sync::Arc;
use std::time::Duration;

use crate::catalogue::{Catalogue, COUNT_SUFFIX};
use crate::ledger::RegistrationLedger;
use crate::source::{source, SourceScheduler, APPLICATION_METRICS_TICK, DEFAULT_NAMESPACE};
use crate::store::{Counter, Gauge, Histogram, HistogramSnapshot, Store};

use super::PerformanceRecorder;

/// Construction options for [`PerformanceMetrics`].
#[derive(Debug, Clone)]
pub struct RecorderOptions {
    /// Prefix of every name handed to the scheduler.
    pub namespace: String,
    /// Sampling tick shared by every source this recorder registers.
    pub tick: Duration,
    /// Names to register at construction.
    pub catalogue: Option<Catalogue>,
}

impl Default for RecorderOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            tick: APPLICATION_METRICS_TICK,
            catalogue: None,
        }
    }
}

/// Real recorder: counter, histogram and gauge stores plus the registration
/// ledger. Each metric's source reaches the scheduler once, on its first
/// write or at construction when it is part of the catalogue.
pub struct PerformanceMetrics {
    counters: Arc<Store<Counter>>,
    histograms: Arc<Store<Histogram>>,
    gauges: Arc<Store<Gauge>>,
    ledger: RegistrationLedger,
}

impl PerformanceMetrics {
    pub fn new(scheduler: Arc<dyn SourceScheduler>, options: RecorderOptions) -> Self {
        let RecorderOptions { namespace, tick, catalogue } = options;
        let metrics = Self {
            counters: Arc::new(Store::new()),
            histograms: Arc::new(Store::new()),
            gauges: Arc::new(Store::new()),
            ledger: RegistrationLedger::new(scheduler, namespace, tick),
        };

        if let Some(catalogue) = catalogue {
            metrics.register_catalogue(&catalogue);
        }
        metrics
    }

    /// Register sources for every name in `catalogue`.
    ///
    /// Sources look the metric up by name on each sample and read 0 until
    /// the first write creates it. Names already registered are skipped.
    pub fn register_catalogue(&self, catalogue: &Catalogue) {
        for name in &catalogue.counters {
            let counters = Arc::clone(&self.counters);
            let key = name.clone();
            self.ledger.register_once_with(name, || {
                source(move || counters.get(&key).map_or(0.0, |c| c.value()))
            });
        }

        for name in &catalogue.gauges {
            let gauges = Arc::clone(&self.gauges);
            let key = name.clone();
            self.ledger.register_once_with(name, || {
                source(move || gauges.get(&key).map_or(0.0, |g| g.value()))
            });
        }

        for name in &catalogue.durations {
            let histograms = Arc::clone(&self.histograms);
            let key = name.clone();
            self.ledger.register_once_with(name, || {
                source(move || histograms.get(&key).map_or(0.0, |h| h.average()))
            });

            let histograms = Arc::clone(&self.histograms);
            let key = name.clone();
            self.ledger.register_once_with(&format!("{name}{COUNT_SUFFIX}"), || {
                source(move || histograms.get(&key).map_or(0.0, |h| h.count() as f64))
            });
        }

        tracing::info!(
            namespace = self.ledger.namespace(),
            sources = catalogue.source_count(),
            "catalogue pre-registered"
        );
    }

    /// Record a raw value into the histogram `name`.
    pub fn record_value(&self, name: &str, value: f64) {
        let (histogram, _) = self.histograms.get_or_create(name);
        histogram.record(value);

        let h = Arc::clone(&histogram);
        self.ledger.register_once_with(name, || source(move || h.average()));
        self.ledger.register_once_with(&format!("{name}{COUNT_SUFFIX}"), || {
            source(move || histogram.count() as f64)
        });
    }

    /// Running average of histogram `name`, 0 for unknown names.
    pub fn average(&self, name: &str) -> f64 {
        self.histograms.get(name).map_or(0.0, |h| h.average())
    }

    pub fn histogram(&self, name: &str) -> Option<HistogramSnapshot> {
        self.histograms.get(name).map(|h| h.snapshot())
    }

    pub fn ledger(&self) -> &RegistrationLedger {
        &self.ledger
    }

    pub fn counter_names(&self) -> Vec<String> {
        self.counters.names()
    }

    pub fn gauge_names(&self) -> Vec<String> {
        self.gauges.names()
    }

    pub fn histogram_names(&self) -> Vec<String> {
        self.histograms.names()
    }
}

impl PerformanceRecorder for PerformanceMetrics {
    fn increment_counter(&self, name: &str, amount: f64) {
        let (counter, _) = self.counters.get_or_create(name);
        if !counter.add(amount) {
            tracing::debug!(metric=%name, amount, "counter increment dropped");
        }
        self.ledger.register_once_with(name, || source(move || counter.value()));
    }

    fn record_duration(&self, name: &str, duration: Duration) {
        self.record_value(name, duration.as_secs_f64());
    }

    fn set_gauge(&self, name: &str, value: f64) {
        let (gauge, _) = self.gauges.get_or_create(name);
        gauge.set(value);
        self.ledger.register_once_with(name, || source(move || gauge.value()));
    }

    fn counter_value(&self, name: &str) -> f64 {
        self.counters.get(name).map_or(0.0, |c| c.value())
    }

    fn gauge_value(&self, name: &str) -> f64 {
        self.gauges.get(name).map_or(0.0, |g| g.value())
    }
}
