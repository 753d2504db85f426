use heartcheck_core::{FeatureVector, PredictionError};

use crate::loaded::ModelKind;

/// A trained model that can score one normalized record.
///
/// Implementations are immutable after load and must be deterministic: the
/// same vector always yields the same probability.
pub trait PositiveClassEstimator: Send + Sync + 'static {
    fn kind(&self) -> ModelKind;

    /// Probability in \[0, 1\] that the record indicates heart disease.
    ///
    /// Callers validate the range; implementations only need to report
    /// failures of the model call itself.
    fn estimate_positive_probability(&self, features: &FeatureVector) -> Result<f64, PredictionError>;
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

pub(crate) fn check_width(expected: usize, features: &FeatureVector) -> Result<(), PredictionError> {
    if features.len() == expected {
        Ok(())
    } else {
        Err(PredictionError::inference(format!(
            "model expects {expected} features, got {}",
            features.len()
        )))
    }
}
