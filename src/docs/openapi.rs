use utoipa::OpenApi;

use crate::handlers::error::AppError;
use crate::handlers::types::TodoBody;
use crate::storage::Todo;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health,
        crate::handlers::todo::get_all,
        crate::handlers::todo::get,
        crate::handlers::todo::add,
        crate::handlers::todo::update,
        crate::handlers::todo::delete,
    ),
    components(
        schemas(Todo, TodoBody, AppError),
    ),
    tags(
        (name = "todo", description = "Create, list, update and delete todo items"),
        (name = "health", description = "Liveness check")
    ),
    info(
        title = "Todo API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
