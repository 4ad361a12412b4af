//! Engine error type.
//!
//! The simulation itself never fails: every policy returns a
//! `SimulationResult` directly.  `CoreError` is produced only by the explicit
//! validation step callers run before handing a workload to a policy.

use thiserror::Error;

/// Validation errors for workloads and scheduler parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("duplicate process name {0:?}")]
    DuplicateName(String),

    #[error("process {0:?} has a zero burst time")]
    ZeroBurst(String),

    #[error("process {0:?} has a zero quantum")]
    ZeroQuantum(String),

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        name:   &'static str,
        reason: String,
    },

    #[error("process {0:?} not found")]
    UnknownProcess(String),
}

/// Shorthand result type for all `cs-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
