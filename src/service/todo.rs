use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    handlers::error::AppError,
    storage::{Todo, TodoFields, TodoId, TodoStorage},
    utils::measure_metrics::measure_and_record_service,
};

pub struct ServiceTodoRef {
    storage: Arc<dyn TodoStorage>,
}

impl ServiceTodoRef {
    pub(crate) fn new(storage: Arc<dyn TodoStorage>) -> Self {
        Self { storage }
    }

    #[instrument(name = "Service::todo::add", skip_all, fields(status = fields.status.as_ref()))]
    pub(crate) async fn add(&self, fields: TodoFields) -> Result<Todo, AppError> {
        measure_and_record_service("add_todo", || async {
            self.storage.insert(fields).await
        })
        .await
        .map_err(Into::into)
    }

    #[instrument(name = "Service::todo::get", skip_all)]
    pub(crate) async fn get(&self, todo_id: TodoId) -> Result<Todo, AppError> {
        measure_and_record_service("get_todo", || async { self.storage.get(todo_id).await })
            .await
            .map_err(Into::into)
    }

    #[instrument(name = "Service::todo::get_all", skip_all)]
    pub(crate) async fn get_all(&self) -> Result<Vec<Todo>, AppError> {
        measure_and_record_service("get_all_todos", || async {
            self.storage.get_all().await
        })
        .await
        .map_err(Into::into)
    }

    #[instrument(name = "Service::todo::update", skip_all, fields(status = fields.status.as_ref()))]
    pub(crate) async fn update(&self, id: TodoId, fields: TodoFields) -> Result<Todo, AppError> {
        info!(todo_id = %id, "update todo");

        measure_and_record_service("update_todo", || async {
            self.storage.update(id, fields).await
        })
        .await
        .map_err(Into::into)
    }

    #[instrument(name = "Service::todo::delete", skip_all)]
    pub(crate) async fn delete(&self, todo_id: TodoId) -> Result<(), AppError> {
        info!(todo_id = %todo_id, "delete todo");

        measure_and_record_service("delete_todo", || async {
            self.storage.delete(todo_id).await
        })
        .await
        .map_err(Into::into)
    }
}
