use std::time::Duration;

use super::PerformanceRecorder;

/// Recorder that drops every write and reads 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

impl PerformanceRecorder for NoopRecorder {
    fn increment_counter(&self, _name: &str, _amount: f64) {}
    fn record_duration(&self, _name: &str, _duration: Duration) {}
    fn set_gauge(&self, _name: &str, _value: f64) {}
    fn counter_value(&self, _name: &str) -> f64 {
        0.0
    }
    fn gauge_value(&self, _name: &str) -> f64 {
        0.0
    }
}
