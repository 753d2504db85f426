//! `heartcheck-model`
//!
//! **Responsibility:** turn a normalized feature vector into a heart-disease
//! prediction.
//!
//! - Model variants are trained offline and only ever *read* here.
//! - Each variant exposes a single capability: estimate the positive-class
//!   probability (see [`PositiveClassEstimator`]).
//! - [`PredictionDispatcher`] owns the decision rule and response shaping.

pub mod classifier;
pub mod dispatcher;
pub mod estimator;
pub mod loaded;
pub mod network;
pub mod result;

pub use classifier::GenericClassifier;
pub use dispatcher::PredictionDispatcher;
pub use estimator::PositiveClassEstimator;
pub use loaded::{LoadedModel, ModelArtifact, ModelError, ModelKind};
pub use network::{Activation, DenseLayer, ProbabilisticNetwork};
pub use result::{DECISION_THRESHOLD, Diagnosis, PredictionResult};
