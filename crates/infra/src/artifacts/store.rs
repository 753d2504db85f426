use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use heartcheck_core::FittedScaler;
use heartcheck_model::{ModelArtifact, ModelKind};

pub const SCALER_ARTIFACT: &str = "scaler.json";

/// Where a trained model lives. Each slot holds exactly one model kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ModelSlot {
    Network,
    Classifier,
}

impl ModelSlot {
    /// Slots in load-preference order.
    pub const PREFERENCE: [ModelSlot; 2] = [ModelSlot::Network, ModelSlot::Classifier];

    pub fn artifact_name(&self) -> &'static str {
        match self {
            ModelSlot::Network => "network.json",
            ModelSlot::Classifier => "classifier.json",
        }
    }

    pub fn expected_kind(&self) -> ModelKind {
        match self {
            ModelSlot::Network => ModelKind::ProbabilisticNetwork,
            ModelSlot::Classifier => ModelKind::GenericClassifier,
        }
    }
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {0}")]
    NotFound(String),

    #[error("failed to access {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {location}: {message}")]
    Parse { location: String, message: String },

    #[error("invalid artifact {location}: {message}")]
    Invalid { location: String, message: String },

    #[error("failed to serialize {location}: {message}")]
    Serialize { location: String, message: String },
}

/// Storage for trained artifacts.
///
/// Implementations only move bytes; (de)serialization and validation are
/// shared by the provided methods so every backend enforces the same rules.
pub trait ArtifactStore: Send + Sync {
    /// Human-readable location of a named artifact (for logs and errors).
    fn location(&self, name: &str) -> String;

    fn read(&self, name: &str) -> Result<Vec<u8>, ArtifactError>;

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), ArtifactError>;

    fn load_scaler(&self) -> Result<FittedScaler, ArtifactError> {
        read_json(self, SCALER_ARTIFACT)
    }

    fn save_scaler(&self, scaler: &FittedScaler) -> Result<(), ArtifactError> {
        write_json(self, SCALER_ARTIFACT, scaler)
    }

    /// Load the model in `slot`, checking its kind and parameter shapes.
    fn load_model(&self, slot: ModelSlot) -> Result<ModelArtifact, ArtifactError> {
        let name = slot.artifact_name();
        let artifact: ModelArtifact = read_json(self, name)?;

        let kind = heartcheck_model::PositiveClassEstimator::kind(&artifact.model);
        if kind != slot.expected_kind() {
            return Err(ArtifactError::Invalid {
                location: self.location(name),
                message: format!("expected a {} model, found {kind}", slot.expected_kind()),
            });
        }

        artifact.model.validate().map_err(|e| ArtifactError::Invalid {
            location: self.location(name),
            message: e.to_string(),
        })?;

        Ok(artifact)
    }

    fn save_model(&self, slot: ModelSlot, artifact: &ModelArtifact) -> Result<(), ArtifactError> {
        write_json(self, slot.artifact_name(), artifact)
    }
}

fn read_json<S, T>(store: &S, name: &str) -> Result<T, ArtifactError>
where
    S: ArtifactStore + ?Sized,
    T: DeserializeOwned,
{
    let bytes = store.read(name)?;
    serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Parse {
        location: store.location(name),
        message: e.to_string(),
    })
}

fn write_json<S, T>(store: &S, name: &str, value: &T) -> Result<(), ArtifactError>
where
    S: ArtifactStore + ?Sized,
    T: Serialize,
{
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| ArtifactError::Serialize {
        location: store.location(name),
        message: e.to_string(),
    })?;
    store.write(name, &bytes)
}
