//! perfmeter runtime library entry.
//!
//! This crate wires config loading, the tokio tick scheduler and the core
//! recorder into a ready-to-use metrics runtime. It is intended to be
//! consumed by applications and by integration tests.

pub mod config;
pub mod runtime;
pub mod scheduler;
pub mod telemetry;

pub use runtime::MetricsRuntime;
pub use scheduler::TickScheduler;
