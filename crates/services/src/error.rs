//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Failures talking to the completion API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("completion API is not configured")]
    Disabled,
    #[error("completion API returned no usable candidate")]
    NoCandidates,
    #[error("completion request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Failures turning raw completion text into a JSON object.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NormalizeError {
    #[error("empty response after cleaning")]
    EmptyResponse,
    #[error("JSON parsing failed: {message}")]
    Parse {
        message: String,
        raw_response: String,
    },
}

/// Every way plan generation can fail, kept as plain values so callers can
/// render them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("empty response after cleaning")]
    EmptyResponse,
    #[error("JSON parsing failed: {message}")]
    Parse {
        message: String,
        raw_response: String,
    },
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl From<NormalizeError> for GenerationError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::EmptyResponse => GenerationError::EmptyResponse,
            NormalizeError::Parse {
                message,
                raw_response,
            } => GenerationError::Parse {
                message,
                raw_response,
            },
        }
    }
}

impl GenerationError {
    /// Raw completion text, when the failure happened after a response arrived.
    #[must_use]
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            GenerationError::Parse { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

/// Errors emitted by `PlanService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlanServiceError {
    #[error("skill topic cannot be empty")]
    EmptyTopic,
    #[error("Skill not found")]
    PlanNotFound,
    #[error("Step not found")]
    StepNotFound,
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `StreakService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StreakServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
