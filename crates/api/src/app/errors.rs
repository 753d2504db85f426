use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use heartcheck_core::PredictionError;

pub fn prediction_error_to_response(err: &PredictionError) -> axum::response::Response {
    match err {
        PredictionError::MissingField(fields) => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "missing_fields",
                "message": err.to_string(),
                "fields": fields,
            })),
        )
            .into_response(),
        PredictionError::InvalidField { .. } => {
            json_error(StatusCode::BAD_REQUEST, "invalid_field", err.to_string())
        }
        PredictionError::MalformedRecord(_) => {
            json_error(StatusCode::BAD_REQUEST, "malformed_record", err.to_string())
        }
        PredictionError::ScalerUnavailable(_) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "scaler_unavailable", err.to_string())
        }
        PredictionError::ModelUnavailable => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "model_unavailable", err.to_string())
        }
        PredictionError::Inference(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "inference_error", err.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
