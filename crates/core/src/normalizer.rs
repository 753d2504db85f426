//! Feature normalizer: record → scaled feature vector.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{PredictionError, PipelineResult};
use crate::record::ClinicalRecord;
use crate::scaler::FittedScaler;

/// Scaled features in canonical column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Validates, reorders and scales incoming records.
///
/// Holds the scaler loaded at start-up, or the reason it could not be loaded.
/// The scaler is never mutated after construction, so a normalizer can be
/// shared freely between requests.
#[derive(Debug, Clone)]
pub struct FeatureNormalizer {
    scaler: Result<Arc<FittedScaler>, String>,
}

impl FeatureNormalizer {
    pub fn new(scaler: Arc<FittedScaler>) -> Self {
        Self { scaler: Ok(scaler) }
    }

    /// A normalizer with no scaler; every call fails with `ScalerUnavailable`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            scaler: Err(reason.into()),
        }
    }

    pub fn scaler(&self) -> Option<&FittedScaler> {
        self.scaler.as_deref().ok()
    }

    pub fn is_ready(&self) -> bool {
        self.scaler.is_ok()
    }

    pub fn normalize(&self, record: &ClinicalRecord) -> PipelineResult<FeatureVector> {
        let scaler = self
            .scaler
            .as_ref()
            .map_err(|reason| PredictionError::scaler_unavailable(reason.clone()))?;

        let ordered = record.ordered_values()?;
        Ok(FeatureVector(scaler.transform(&ordered)))
    }
}
