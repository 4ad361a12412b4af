use cs_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("unknown policy {0:?}: expected one of sjf, rr, priority, ag")]
    UnknownPolicy(String),

    #[error("invalid input: {0}")]
    Core(#[from] CoreError),
}

pub type PolicyResult<T> = Result<T, PolicyError>;
