//! Top-level facade crate for perfmeter.
//!
//! Re-exports the core recorder and the runtime so users can depend on a single crate.

pub mod core {
    pub use perfmeter_core::*;
}

pub mod runtime {
    pub use perfmeter_runtime::*;
}
