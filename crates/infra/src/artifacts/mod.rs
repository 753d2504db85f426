//! Trained artifact storage and the start-up load policy.
//!
//! Load policy:
//! - The scaler is loaded on its own; without it every prediction fails with
//!   `ScalerUnavailable`.
//! - Models are tried in [`ModelSlot::PREFERENCE`] order (network first). A
//!   missing or broken artifact is logged and the next slot is tried.
//! - Nothing here aborts start-up: the service comes up and reports what is
//!   missing per request.

pub mod fs;
pub mod in_memory;
pub mod store;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use heartcheck_core::FeatureNormalizer;
use heartcheck_model::{LoadedModel, PositiveClassEstimator, PredictionDispatcher};

pub use fs::FsArtifactStore;
pub use in_memory::InMemoryArtifactStore;
pub use store::{ArtifactError, ArtifactStore, ModelSlot, SCALER_ARTIFACT};

/// Everything serving needs, loaded once.
#[derive(Debug, Clone)]
pub struct ServingArtifacts {
    pub normalizer: FeatureNormalizer,
    pub model: Option<Arc<LoadedModel>>,
    pub model_trained_at: Option<DateTime<Utc>>,
}

impl ServingArtifacts {
    pub fn into_dispatcher(self) -> PredictionDispatcher {
        PredictionDispatcher::new(self.normalizer, self.model)
    }
}

pub fn load_serving_artifacts<S: ArtifactStore + ?Sized>(store: &S) -> ServingArtifacts {
    let normalizer = match store.load_scaler() {
        Ok(scaler) => {
            tracing::info!(
                location = %store.location(SCALER_ARTIFACT),
                columns = scaler.column_count(),
                "loaded scaler"
            );
            FeatureNormalizer::new(Arc::new(scaler))
        }
        Err(e) => {
            tracing::warn!(error = %e, "scaler unavailable");
            FeatureNormalizer::unavailable(e.to_string())
        }
    };

    let mut model = None;
    let mut model_trained_at = None;
    for slot in ModelSlot::PREFERENCE {
        match store.load_model(slot) {
            Ok(artifact) => {
                tracing::info!(
                    location = %store.location(slot.artifact_name()),
                    kind = %artifact.model.kind(),
                    "loaded model"
                );
                model_trained_at = artifact.trained_at;
                model = Some(Arc::new(artifact.model));
                break;
            }
            Err(ArtifactError::NotFound(location)) => {
                tracing::debug!(%location, "model artifact not present");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load model, trying next");
            }
        }
    }

    if model.is_none() {
        tracing::warn!("no model loaded; predictions will be rejected until a model is trained");
    }

    ServingArtifacts {
        normalizer,
        model,
        model_trained_at,
    }
}
