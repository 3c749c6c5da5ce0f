pub(crate) mod error;
pub(crate) mod todo;
pub mod types;

pub(crate) use crate::service::Service;
use axum::{http::StatusCode, response::IntoResponse};
pub(crate) use types::*;

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
#[tracing::instrument(name = "health", skip_all)]
pub(crate) async fn health() -> impl IntoResponse {
    StatusCode::OK
}
