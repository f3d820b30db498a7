//! Logging setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the fmt subscriber filtered by `RUST_LOG`.
/// A subscriber installed earlier (e.g. by a test harness) is kept.
pub fn init_tracing() {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
}
