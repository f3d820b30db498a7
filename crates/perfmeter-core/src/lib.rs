//! perfmeter core: in-process counters, histograms and gauges with
//! exactly-once source registration.
//!
//! Producers write through a [`PerformanceRecorder`]; each metric lives in a
//! store cell guarded by its own lock. On a metric's first write the
//! [`RegistrationLedger`] hands a read-only [`Source`] closure to the injected
//! [`SourceScheduler`], which samples it on its own cadence. This crate never
//! pushes values and runs no background tasks.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. No public write or
//! read is fallible; scheduler failures are logged and swallowed.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod catalogue;
pub mod error;
pub mod ledger;
pub mod recorder;
pub mod source;
pub mod store;

pub use catalogue::Catalogue;
/// Shared result type.
pub use error::{MetricsError, Result};
pub use ledger::RegistrationLedger;
pub use recorder::{NoopRecorder, PerformanceMetrics, PerformanceRecorder, RecorderOptions};
pub use source::{Source, SourceScheduler};
