use cs_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("workload parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid workload: {0}")]
    Invalid(#[from] CoreError),
}

impl From<cs_policy::PolicyError> for WorkloadError {
    fn from(e: cs_policy::PolicyError) -> Self {
        match e {
            cs_policy::PolicyError::Core(core) => WorkloadError::Invalid(core),
            other => WorkloadError::Parse(other.to_string()),
        }
    }
}

pub type WorkloadResult<T> = Result<T, WorkloadError>;
