//! `heartcheck-core` — clinical record schema and feature preprocessing.
//!
//! This crate contains the **pure** input side of the prediction pipeline
//! (no model, no I/O): the canonical feature schema, record coercion, the
//! fitted scaler and the normalizer that ties them together.

pub mod error;
pub mod normalizer;
pub mod record;
pub mod scaler;
pub mod schema;

pub use error::{PredictionError, PipelineResult};
pub use normalizer::{FeatureNormalizer, FeatureVector};
pub use record::ClinicalRecord;
pub use scaler::{FittedScaler, ScalerError};
pub use schema::{FEATURE_COUNT, FEATURES, FeatureKind, FeatureSpec};
