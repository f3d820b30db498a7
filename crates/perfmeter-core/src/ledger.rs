//! Exactly-once registration of sources with the scheduler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use crate::source::{qualified_name, Source, SourceScheduler};

/// Tracks which metric names already handed a source to the scheduler.
///
/// The check-and-mark is a compare-and-set on the name's flag; the hand-off
/// to the scheduler happens after every lock is released.
pub struct RegistrationLedger {
    flags: DashMap<String, AtomicBool>,
    scheduler: Arc<dyn SourceScheduler>,
    namespace: String,
    tick: Duration,
}

impl RegistrationLedger {
    pub fn new(
        scheduler: Arc<dyn SourceScheduler>,
        namespace: impl Into<String>,
        tick: Duration,
    ) -> Self {
        Self {
            flags: DashMap::new(),
            scheduler,
            namespace: namespace.into(),
            tick,
        }
    }

    /// Hand `source` to the scheduler unless `name` was registered before.
    /// Returns `true` for the single caller that won the registration.
    pub fn register_once(&self, name: &str, source: Source) -> bool {
        self.register_once_with(name, || source)
    }

    /// Like [`register_once`](Self::register_once), but only builds the
    /// source when this call wins.
    pub fn register_once_with<F>(&self, name: &str, make_source: F) -> bool
    where
        F: FnOnce() -> Source,
    {
        if !self.claim(name) {
            return false;
        }

        let qualified = qualified_name(&self.namespace, name);
        match self.scheduler.observe_source(&qualified, make_source(), self.tick) {
            Ok(()) => {
                tracing::debug!(metric=%qualified, tick=?self.tick, "source registered");
            }
            Err(e) => {
                // Still accumulated internally, just not exported.
                tracing::warn!(
                    metric=%qualified,
                    code=e.code().as_str(),
                    error=%e,
                    "could not register source"
                );
            }
        }
        true
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .map(|f| f.load(Ordering::Acquire))
            .unwrap_or(false)
    }

    pub fn registered_count(&self) -> usize {
        self.flags.iter().filter(|f| f.value().load(Ordering::Acquire)).count()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    fn claim(&self, name: &str) -> bool {
        if self.is_registered(name) {
            return false;
        }
        let flag = self
            .flags
            .entry(name.to_string())
            .or_insert_with(|| AtomicBool::new(false));
        let won = flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        drop(flag);
        won
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MetricsError, Result};
    use crate::source::source;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<(String, Duration)>>,
        fail: bool,
    }

    impl SourceScheduler for Recording {
        fn observe_source(&self, name: &str, _source: Source, tick: Duration) -> Result<()> {
            self.calls.lock().push((name.to_string(), tick));
            if self.fail {
                return Err(MetricsError::DuplicateSource(name.to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn second_registration_is_noop() {
        let sched = Arc::new(Recording::default());
        let ledger = RegistrationLedger::new(sched.clone(), "performance", Duration::from_secs(60));

        assert!(ledger.register_once("x", source(|| 1.0)));
        assert!(!ledger.register_once("x", source(|| 2.0)));
        assert!(ledger.is_registered("x"));
        assert!(!ledger.is_registered("y"));
        assert_eq!(ledger.tick(), Duration::from_secs(60));
        assert_eq!(ledger.namespace(), "performance");

        let calls = sched.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("performance_x".to_string(), Duration::from_secs(60)));
    }

    #[test]
    fn lazy_source_built_only_by_winner() {
        let sched = Arc::new(Recording::default());
        let ledger = RegistrationLedger::new(sched, "app", Duration::from_secs(1));

        let mut built = 0;
        ledger.register_once_with("m", || {
            built += 1;
            source(|| 0.0)
        });
        ledger.register_once_with("m", || {
            built += 1;
            source(|| 0.0)
        });
        assert_eq!(built, 1);
        assert_eq!(ledger.registered_count(), 1);
    }

    #[test]
    fn scheduler_failure_still_marks_registered() {
        let sched = Arc::new(Recording { fail: true, ..Default::default() });
        let ledger = RegistrationLedger::new(sched.clone(), "app", Duration::from_secs(1));

        assert!(ledger.register_once("m", source(|| 0.0)));
        assert!(!ledger.register_once("m", source(|| 0.0)));
        assert_eq!(sched.calls.lock().len(), 1);
    }
}
