use chrono::{DateTime, Utc};
use serde::Serialize;

use heartcheck_core::{FEATURE_COUNT, FEATURES, FeatureSpec};
use heartcheck_model::ModelKind;

use crate::context::ServingContext;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub model_loaded: bool,
    pub model_kind: Option<ModelKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_trained_at: Option<DateTime<Utc>>,
    pub scaler_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaler_fitted_at: Option<DateTime<Utc>>,
    pub feature_count: usize,
}

impl StatusResponse {
    pub fn from_context(ctx: &ServingContext) -> Self {
        let dispatcher = ctx.dispatcher();
        let scaler = dispatcher.normalizer().scaler();
        Self {
            model_loaded: dispatcher.model().is_some(),
            model_kind: dispatcher.model_kind(),
            model_trained_at: ctx.model_trained_at(),
            scaler_loaded: scaler.is_some(),
            scaler_fitted_at: scaler.and_then(|s| s.fitted_at()),
            feature_count: FEATURE_COUNT,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub count: usize,
    pub features: &'static [FeatureSpec],
}

impl SchemaResponse {
    pub fn canonical() -> Self {
        Self {
            count: FEATURE_COUNT,
            features: &FEATURES,
        }
    }
}
