use crate::storage::StorageError;
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use strum_macros::AsRefStr;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error, AsRefStr, ToSchema)]
#[strum(serialize_all = "snake_case")]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("No content")]
    NoContent,

    #[schema(value_type = String)]
    #[error("Invalid todo id")]
    InvalidId(#[source] StorageError),

    #[schema(value_type = String)]
    #[error("Invalid todo data: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[schema(value_type = String)]
    #[error("Failed to read request body")]
    ReadBody(#[from] BytesRejection),

    #[schema(value_type = String)]
    #[error("Internal storage error")]
    InternalStorage(#[source] StorageError),
}

impl From<StorageError> for AppError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound => Self::NotFound,
            StorageError::NoContent => Self::NoContent,
            StorageError::ParseIdFromString(_) => Self::InvalidId(value),
            _ => Self::InternalStorage(value),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::NoContent => StatusCode::NO_CONTENT,
            AppError::InvalidId { .. } | AppError::InvalidBody { .. } | AppError::ReadBody { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::InternalStorage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = ?self, "AppError");
        } else {
            tracing::warn!(error = ?self, "AppError");
        }

        if status == StatusCode::NO_CONTENT {
            return status.into_response();
        }

        let body = Json(json!({
            "error": self.as_ref(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_map_to_statuses() {
        assert_eq!(AppError::from(StorageError::NotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::from(StorageError::NoContent).status(), StatusCode::NO_CONTENT);

        let parse_error = "xyz".parse::<crate::storage::TodoId>().unwrap_err();
        let error = AppError::from(parse_error);
        assert!(matches!(error, AppError::InvalidId(_)));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.as_ref(), "invalid_id");
    }

    #[test]
    fn malformed_body_is_bad_request() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = AppError::from(json_error);
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.as_ref(), "invalid_body");
    }
}
