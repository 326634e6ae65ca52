//! Shared error type across irisml crates.

use serde::Serialize;
use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// One or more request fields violated their declared range.
    ValidationFailed,
    /// Classifier not trained or loaded yet.
    ModelUnavailable,
    /// Inference ran and failed unexpectedly.
    InferenceFailed,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::ValidationFailed => "VALIDATION_FAILED",
            ClientCode::ModelUnavailable => "MODEL_UNAVAILABLE",
            ClientCode::InferenceFailed => "INFERENCE_FAILED",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status the code maps to. Kept as a bare `u16` so this crate
    /// stays free of HTTP framework dependencies.
    pub fn http_status(self) -> u16 {
        match self {
            ClientCode::BadRequest => 400,
            ClientCode::ValidationFailed => 422,
            ClientCode::ModelUnavailable => 503,
            ClientCode::InferenceFailed => 500,
            ClientCode::Internal => 500,
        }
    }
}

/// Metric label values for prediction failures.
///
/// A deliberately closed set: labeling error counters with arbitrary runtime
/// type names makes label cardinality unbounded, which the scraping side
/// cannot absorb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Prediction requested before the model was trained or loaded.
    ModelNotLoaded,
    /// Inference was invoked and failed.
    InferenceFailure,
}

impl ErrorKind {
    /// Label value used in `ml_prediction_errors_total{error_type=...}`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ModelNotLoaded => "model_not_loaded",
            ErrorKind::InferenceFailure => "inference_failure",
        }
    }
}

/// A single violated field constraint, reported back to the client.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldViolation {
    /// Request field name.
    pub field: &'static str,
    /// Human-readable constraint description.
    pub message: String,
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ServeError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("validation failed: {}", format_violations(.0))]
    Validation(Vec<FieldViolation>),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("model not trained or loaded")]
    ModelUnavailable,
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("training failed: {0}")]
    Training(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ServeError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            ServeError::Validation(_) => ClientCode::ValidationFailed,
            ServeError::BadRequest(_) => ClientCode::BadRequest,
            ServeError::ModelUnavailable => ClientCode::ModelUnavailable,
            ServeError::Inference(_) => ClientCode::InferenceFailed,
            ServeError::Training(_) => ClientCode::Internal,
            ServeError::Internal(_) => ClientCode::Internal,
        }
    }
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}
