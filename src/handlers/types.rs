use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::error::AppError;
use crate::{
    storage::{TodoFields, TodoStatus},
    trace_err,
};

/// Body of POST and PUT. A missing or `null` `status` means `NOT_STARTED`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TodoBody {
    pub name: String,
    #[serde(default, deserialize_with = "status_or_default")]
    #[schema(value_type = Option<u8>)]
    pub status: TodoStatus,
}

fn status_or_default<'de, D>(deserializer: D) -> Result<TodoStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TodoStatus>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<TodoBody> for TodoFields {
    fn from(value: TodoBody) -> Self {
        Self {
            name: value.name,
            status: value.status,
        }
    }
}

/// JSON body read from the raw bytes regardless of `Content-Type`, with
/// failures reported as [`AppError`].
#[derive(Debug)]
pub(crate) struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    #[instrument(name = "construct_json_body_from_request", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = trace_err!(
            Bytes::from_request(req, state).await,
            "failed to read request body"
        )?;

        let value = trace_err!(
            serde_json::from_slice::<T>(&bytes),
            "failed to deserialize request body"
        )?;

        Ok(Self(value))
    }
}
