#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, OnceLock, Weak};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use perfmeter_core::error::Result;
use perfmeter_core::{
    PerformanceMetrics, PerformanceRecorder, RecorderOptions, Source, SourceScheduler,
};

/// Scheduler double that only counts hand-offs per qualified name.
#[derive(Default)]
struct CountingScheduler {
    calls: dashmap::DashMap<String, AtomicUsize>,
}

impl CountingScheduler {
    fn calls_for(&self, name: &str) -> usize {
        self.calls.get(name).map(|c| c.load(Ordering::SeqCst)).unwrap_or(0)
    }

    fn total(&self) -> usize {
        self.calls.iter().map(|c| c.load(Ordering::SeqCst)).sum()
    }
}

impl SourceScheduler for CountingScheduler {
    fn observe_source(&self, name: &str, _source: Source, _tick: Duration) -> Result<()> {
        // Widen the race window between claim and hand-off.
        thread::yield_now();
        self.calls
            .entry(name.to_string())
            .or_insert_with(|| AtomicUsize::new(0))
            .fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn setup() -> (Arc<CountingScheduler>, Arc<PerformanceMetrics>) {
    let sched = Arc::new(CountingScheduler::default());
    let metrics = Arc::new(PerformanceMetrics::new(sched.clone(), RecorderOptions::default()));
    (sched, metrics)
}

fn run_concurrently<F>(threads: usize, f: F)
where
    F: Fn(usize) + Send + Sync + 'static,
{
    let f = Arc::new(f);
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let f = Arc::clone(&f);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                f(i);
            })
        })
        .collect();
    for h in handles {
        h.join().expect("worker panicked");
    }
}

#[test]
fn concurrent_increments_sum_exactly() {
    const N: usize = 16;
    const M: usize = 1_000;

    let (sched, metrics) = setup();
    let m = Arc::clone(&metrics);
    run_concurrently(N, move |_| {
        for _ in 0..M {
            m.increment_counter("x", 1.0);
        }
    });

    assert_eq!(metrics.counter_value("x"), (N * M) as f64);
    assert_eq!(sched.calls_for("performance_x"), 1);
}

#[test]
fn concurrent_first_writes_register_once() {
    const N: usize = 32;

    for round in 0..20 {
        let (sched, metrics) = setup();
        let name = format!("fresh_{round}");

        let m = Arc::clone(&metrics);
        let n = name.clone();
        run_concurrently(N, move |i| match i % 3 {
            0 => m.increment_counter(&n, 1.0),
            1 => m.set_gauge(&format!("{n}_gauge"), i as f64),
            _ => m.record_duration(&format!("{n}_seconds"), Duration::from_millis(i as u64)),
        });

        assert_eq!(sched.calls_for(&format!("performance_{name}")), 1);
        assert_eq!(sched.calls_for(&format!("performance_{name}_gauge")), 1);
        assert_eq!(sched.calls_for(&format!("performance_{name}_seconds")), 1);
        assert_eq!(sched.calls_for(&format!("performance_{name}_seconds_count")), 1);
        assert_eq!(sched.total(), 4);
        assert_eq!(metrics.ledger().registered_count(), 4);
    }
}

#[test]
fn concurrent_durations_keep_count_and_sum() {
    const N: usize = 8;
    const M: usize = 250;

    let (_sched, metrics) = setup();
    let m = Arc::clone(&metrics);
    run_concurrently(N, move |_| {
        for _ in 0..M {
            m.record_duration("op_seconds", Duration::from_millis(500));
        }
    });

    let snap = metrics.histogram("op_seconds").unwrap();
    assert_eq!(snap.count, (N * M) as u64);
    assert_eq!(snap.bucket(1.0), Some((N * M) as u64));
    assert!((snap.sum - 0.5 * (N * M) as f64).abs() < 1e-6);
    assert!((metrics.average("op_seconds") - 0.5).abs() < 1e-9);
}

#[test]
fn readers_do_not_create_entries_under_contention() {
    let (sched, metrics) = setup();
    let m = Arc::clone(&metrics);
    run_concurrently(8, move |i| {
        for _ in 0..100 {
            assert_eq!(m.counter_value("absent"), 0.0);
            assert_eq!(m.gauge_value("absent"), 0.0);
            m.set_gauge(&format!("g{i}"), 1.0);
        }
    });

    assert!(metrics.counter_names().is_empty());
    assert_eq!(metrics.gauge_names().len(), 8);
    assert_eq!(sched.total(), 8);
}

/// Scheduler that samples the source and writes back into the recorder
/// from inside `observe_source`.
#[derive(Default)]
struct CallbackScheduler {
    recorder: OnceLock<Weak<PerformanceMetrics>>,
    // (name, sampled value, counter "x" as seen from inside the call)
    seen: Mutex<Vec<(String, f64, f64)>>,
}

impl SourceScheduler for CallbackScheduler {
    fn observe_source(&self, name: &str, source: Source, _tick: Duration) -> Result<()> {
        let sampled = source();
        let mut x = f64::NAN;
        if let Some(m) = self.recorder.get().and_then(Weak::upgrade) {
            if name != "performance_side_total" {
                m.increment_counter("side_total", 1.0);
            }
            x = m.counter_value("x");
        }
        self.seen.lock().push((name.to_string(), sampled, x));
        Ok(())
    }
}

#[test]
fn scheduler_may_call_back_into_recorder() {
    let sched = Arc::new(CallbackScheduler::default());
    let metrics = Arc::new(PerformanceMetrics::new(sched.clone(), RecorderOptions::default()));
    sched.recorder.set(Arc::downgrade(&metrics)).unwrap();

    metrics.increment_counter("x", 2.0);
    metrics.set_gauge("g", 5.0);
    metrics.record_duration("d", Duration::from_secs(3));

    let seen = sched.seen.lock().clone();
    let names: Vec<&str> = seen.iter().map(|(n, _, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "performance_side_total",
            "performance_x",
            "performance_g",
            "performance_d",
            "performance_d_count",
        ]
    );

    // Each source was sampled mid-registration and saw the value written just before.
    let sampled: Vec<f64> = seen.iter().map(|(_, v, _)| *v).collect();
    assert_eq!(sampled, vec![1.0, 2.0, 5.0, 3.0, 1.0]);
    assert!(seen.iter().all(|(_, _, x)| *x == 2.0));

    assert_eq!(metrics.counter_value("side_total"), 4.0);
    assert_eq!(metrics.ledger().registered_count(), 5);
}
