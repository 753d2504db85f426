use axum::{Json, extract::Extension, http::StatusCode};

use crate::app::dto::{SchemaResponse, StatusResponse};
use crate::context::ServingContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn status(Extension(ctx): Extension<ServingContext>) -> Json<StatusResponse> {
    Json(StatusResponse::from_context(&ctx))
}

pub async fn schema() -> Json<SchemaResponse> {
    Json(SchemaResponse::canonical())
}
