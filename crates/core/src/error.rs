//! Prediction pipeline error model.

use thiserror::Error;

/// Result type used across the prediction pipeline.
pub type PipelineResult<T> = Result<T, PredictionError>;

/// Failure of a single prediction request.
///
/// Every variant is terminal for the request: nothing is retried and no
/// partial result is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PredictionError {
    /// One or more required fields were absent (canonical order).
    #[error("missing input fields: {}", .0.join(", "))]
    MissingField(Vec<String>),

    /// A field was present but could not be coerced to its declared kind.
    #[error("invalid value for field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },

    /// The submitted payload was not a record at all (e.g. a JSON array).
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// No fitted scaler artifact is available.
    #[error("scaler not available: {0}. Please train the model first.")]
    ScalerUnavailable(String),

    /// No model variant was loaded at start-up.
    #[error("model not loaded. Please train the model first.")]
    ModelUnavailable,

    /// The underlying model call failed or produced an unusable output.
    #[error("inference failed: {0}")]
    Inference(String),
}

impl PredictionError {
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    pub fn scaler_unavailable(msg: impl Into<String>) -> Self {
        Self::ScalerUnavailable(msg.into())
    }

    /// True for failures caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::InvalidField { .. } | Self::MalformedRecord(_)
        )
    }
}
