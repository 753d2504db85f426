//! Infrastructure layer: artifact storage and start-up loading.

pub mod artifacts;

pub use artifacts::{
    ArtifactError, ArtifactStore, FsArtifactStore, InMemoryArtifactStore, ModelSlot, ServingArtifacts,
    load_serving_artifacts,
};
