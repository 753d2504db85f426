//! Prediction endpoints.
//!
//! Form and JSON submissions differ only in how the record is decoded; both
//! then go through the same dispatcher and error mapping.

use axum::{
    Form, Json,
    extract::{
        Extension,
        rejection::{FormRejection, JsonRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value as JsonValue;

use heartcheck_core::{ClinicalRecord, PredictionError};

use crate::app::errors;
use crate::context::{RequestContext, ServingContext};

pub async fn predict_json(
    Extension(ctx): Extension<ServingContext>,
    Extension(req): Extension<RequestContext>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> axum::response::Response {
    if let Some(unavailable) = reject_without_model(&ctx) {
        return unavailable;
    }

    let record = match body {
        Ok(Json(value)) => ClinicalRecord::from_json(&value),
        Err(rejection) => Err(PredictionError::MalformedRecord(rejection.body_text())),
    };

    respond(&ctx, req, record)
}

pub async fn predict_form(
    Extension(ctx): Extension<ServingContext>,
    Extension(req): Extension<RequestContext>,
    body: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> axum::response::Response {
    if let Some(unavailable) = reject_without_model(&ctx) {
        return unavailable;
    }

    let record = match body {
        Ok(Form(pairs)) => ClinicalRecord::from_form(pairs),
        Err(rejection) => Err(PredictionError::MalformedRecord(rejection.body_text())),
    };

    respond(&ctx, req, record)
}

/// Without a model nothing else about the request matters.
fn reject_without_model(ctx: &ServingContext) -> Option<axum::response::Response> {
    if ctx.dispatcher().model().is_some() {
        return None;
    }
    tracing::warn!("prediction requested but no model is loaded");
    Some(errors::prediction_error_to_response(&PredictionError::ModelUnavailable))
}

fn respond(
    ctx: &ServingContext,
    req: RequestContext,
    record: Result<ClinicalRecord, PredictionError>,
) -> axum::response::Response {
    match record.and_then(|r| ctx.dispatcher().predict(&r)) {
        Ok(result) => {
            tracing::info!(
                request_id = %req.request_id(),
                prediction = %result.prediction,
                probability = result.probability,
                confidence = result.confidence,
                "prediction served"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => {
            if e.is_client_error() {
                tracing::info!(request_id = %req.request_id(), error = %e, "prediction rejected");
            } else {
                tracing::error!(request_id = %req.request_id(), error = %e, "prediction failed");
            }
            errors::prediction_error_to_response(&e)
        }
    }
}
