use super::error::AppError;
use super::types::*;
use crate::{
    handlers::Service,
    storage::{Todo, TodoId},
    utils::RootSpan,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use tracing::info;

fn parse_id(raw: &str) -> Result<TodoId, AppError> {
    Ok(raw.parse::<TodoId>()?)
}

#[utoipa::path(
    post,
    path = "/todo",
    request_body(
        content = TodoBody,
        description = "New todo item; status defaults to NOT_STARTED (0)",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Todo created", body = Todo),
        (status = 400, description = "Malformed body"),
        (status = 500, description = "Storage failure"),
    ),
    tag = "todo"
)]
#[tracing::instrument(name = "handlers::todo::add", skip_all)]
pub(crate) async fn add(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
    JsonBody(input): JsonBody<TodoBody>,
) -> Result<impl IntoResponse, AppError> {
    match service.todo().add(input.into()).await {
        Ok(todo) => {
            root_span.record().todo_id(&todo.id);
            info!(todo = ?todo, "added todo");
            Ok(Json(todo))
        }
        Err(e) => {
            tracing::error!(err = ?e, "failed to add new todo");
            Err(e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/todo",
    responses(
        (status = 200, description = "All todo items", body = Vec<Todo>),
        (status = 500, description = "Storage failure"),
    ),
    tag = "todo"
)]
#[tracing::instrument(name = "handlers::todo::get_all", skip_all)]
pub(crate) async fn get_all(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
) -> Result<impl IntoResponse, AppError> {
    let items = service.todo().get_all().await?;

    root_span.record().todo_count(items.len());
    info!("Get {} todos", items.len());

    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/todo/{id}",
    params(
        ("id" = String, Path, description = "Todo ID, 24 hex characters")
    ),
    responses(
        (status = 200, description = "Get todo by ID", body = Todo),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Todo not found"),
    ),
    tag = "todo"
)]
#[tracing::instrument(name = "handlers::todo::get", skip_all)]
pub(crate) async fn get(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    root_span.record().todo_id(&id);

    let todo = service.todo().get(id).await?;

    tracing::info!(todo = ?todo, "Get todo");

    Ok(Json(todo))
}

#[utoipa::path(
    put,
    path = "/todo/{id}",
    params(
        ("id" = String, Path, description = "Todo ID, 24 hex characters")
    ),
    request_body(
        content = TodoBody,
        description = "New name and status",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Todo updated", body = Todo),
        (status = 400, description = "Malformed ID or body"),
        (status = 404, description = "Todo not found"),
        (status = 500, description = "Storage failure"),
    ),
    tag = "todo"
)]
#[tracing::instrument(name = "handlers::todo::update", skip_all)]
pub(crate) async fn update(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<TodoBody>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    root_span.record().todo_id(&id);

    let todo = service.todo().update(id, input.into()).await?;

    Ok(Json(todo))
}

#[utoipa::path(
    delete,
    path = "/todo/{id}",
    params(
        ("id" = String, Path, description = "Todo ID, 24 hex characters")
    ),
    responses(
        (status = 200, description = "Todo deleted"),
        (status = 204, description = "Todo not found"),
        (status = 400, description = "Malformed ID"),
        (status = 500, description = "Storage failure"),
    ),
    tag = "todo"
)]
#[tracing::instrument(name = "handlers::todo::delete", skip_all)]
pub(crate) async fn delete(
    State(service): State<Service>,
    Extension(root_span): Extension<RootSpan>,
    Path(id): Path<String>,
) -> Result<(), AppError> {
    let id = parse_id(&id)?;
    root_span.record().todo_id(&id);

    service.todo().delete(id).await?;

    Ok(())
}
