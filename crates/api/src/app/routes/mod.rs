use axum::{
    Router,
    routing::{get, post},
};

pub mod predict;
pub mod system;

/// Router for the prediction service.
pub fn router() -> Router {
    Router::new()
        .route("/predict", post(predict::predict_form))
        .route("/api/predict", post(predict::predict_json))
        .route("/api/status", get(system::status))
        .route("/api/schema", get(system::schema))
}
