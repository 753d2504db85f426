use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use heartcheck_infra::{ArtifactStore, ServingArtifacts, load_serving_artifacts};
use heartcheck_model::PredictionDispatcher;

/// Process-wide serving state, loaded once at start-up.
///
/// Immutable after construction; handlers share it through an `Arc` with no
/// locking.
#[derive(Debug, Clone)]
pub struct ServingContext {
    inner: Arc<ServingInner>,
}

#[derive(Debug)]
struct ServingInner {
    dispatcher: PredictionDispatcher,
    model_trained_at: Option<DateTime<Utc>>,
}

impl ServingContext {
    pub fn new(dispatcher: PredictionDispatcher) -> Self {
        Self::with_trained_at(dispatcher, None)
    }

    pub fn with_trained_at(dispatcher: PredictionDispatcher, model_trained_at: Option<DateTime<Utc>>) -> Self {
        Self {
            inner: Arc::new(ServingInner {
                dispatcher,
                model_trained_at,
            }),
        }
    }

    pub fn from_artifacts(artifacts: ServingArtifacts) -> Self {
        let trained_at = artifacts.model_trained_at;
        Self::with_trained_at(artifacts.into_dispatcher(), trained_at)
    }

    /// Load every artifact from `store` (never fails; gaps surface per request).
    pub fn load<S: ArtifactStore + ?Sized>(store: &S) -> Self {
        Self::from_artifacts(load_serving_artifacts(store))
    }

    pub fn dispatcher(&self) -> &PredictionDispatcher {
        &self.inner.dispatcher
    }

    pub fn model_trained_at(&self) -> Option<DateTime<Utc>> {
        self.inner.model_trained_at
    }
}

/// Per-request context (set by middleware).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: Uuid,
}

impl RequestContext {
    pub fn new(request_id: Uuid) -> Self {
        Self { request_id }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }
}
