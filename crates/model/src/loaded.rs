use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use heartcheck_core::{FeatureVector, PredictionError};

use crate::classifier::GenericClassifier;
use crate::estimator::PositiveClassEstimator;
use crate::network::ProbabilisticNetwork;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid model parameters: {0}")]
    Invalid(String),
}

impl ModelError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    ProbabilisticNetwork,
    GenericClassifier,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::ProbabilisticNetwork => "probabilistic_network",
            ModelKind::GenericClassifier => "generic_classifier",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A model variant, tagged with its kind at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadedModel {
    ProbabilisticNetwork(ProbabilisticNetwork),
    GenericClassifier(GenericClassifier),
}

impl LoadedModel {
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            LoadedModel::ProbabilisticNetwork(net) => net.validate(),
            LoadedModel::GenericClassifier(clf) => clf.validate(),
        }
    }
}

impl PositiveClassEstimator for LoadedModel {
    fn kind(&self) -> ModelKind {
        match self {
            LoadedModel::ProbabilisticNetwork(net) => net.kind(),
            LoadedModel::GenericClassifier(clf) => clf.kind(),
        }
    }

    fn estimate_positive_probability(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        match self {
            LoadedModel::ProbabilisticNetwork(net) => net.estimate_positive_probability(features),
            LoadedModel::GenericClassifier(clf) => clf.estimate_positive_probability(features),
        }
    }
}

impl From<ProbabilisticNetwork> for LoadedModel {
    fn from(value: ProbabilisticNetwork) -> Self {
        LoadedModel::ProbabilisticNetwork(value)
    }
}

impl From<GenericClassifier> for LoadedModel {
    fn from(value: GenericClassifier) -> Self {
        LoadedModel::GenericClassifier(value)
    }
}

/// On-disk envelope for a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<DateTime<Utc>>,
    pub model: LoadedModel,
}

impl ModelArtifact {
    pub fn new(model: impl Into<LoadedModel>) -> Self {
        Self {
            trained_at: None,
            model: model.into(),
        }
    }

    pub fn with_trained_at(mut self, trained_at: DateTime<Utc>) -> Self {
        self.trained_at = Some(trained_at);
        self
    }
}
