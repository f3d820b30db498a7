//! Shared error type across perfmeter crates.

use thiserror::Error;

/// Stable error codes, used by callers that log or assert on failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid or unknown configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// The scheduler already observes a source under this name.
    DuplicateSource,
    /// The scheduler refused the source for another reason.
    Scheduler,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::DuplicateSource => "DUPLICATE_SOURCE",
            ErrorCode::Scheduler => "SCHEDULER",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and runtime.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("source already observed: {0}")]
    DuplicateSource(String),
    #[error("scheduler: {0}")]
    Scheduler(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MetricsError::BadConfig(_) => ErrorCode::BadConfig,
            MetricsError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            MetricsError::DuplicateSource(_) => ErrorCode::DuplicateSource,
            MetricsError::Scheduler(_) => ErrorCode::Scheduler,
            MetricsError::Internal(_) => ErrorCode::Internal,
        }
    }
}
