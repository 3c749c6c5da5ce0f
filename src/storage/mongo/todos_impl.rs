use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{bson::doc, options::ReturnDocument};
use tracing::{info, instrument, warn};

use super::error::MongoStorageError;
use super::{object_id, MongoStorage, MongoTodo, STORAGE_KIND};
use crate::storage::{StorageError, Todo, TodoFields, TodoId, TodoStorage};
use crate::trace_err;
use crate::utils::measure_metrics::measure_and_record_storage_async;

#[async_trait]
impl TodoStorage for MongoStorage {
    #[instrument(name = "MongoStorage::insert_todo", skip_all)]
    async fn insert(&self, fields: TodoFields) -> Result<Todo, StorageError> {
        measure_and_record_storage_async(STORAGE_KIND, "MongoStorage::insert_todo", || async {
            let document = MongoTodo {
                id: None,
                name: fields.name,
                status: fields.status,
            };

            let result = trace_err!(
                self.todos.insert_one(&document).await,
                "failed to insert todo"
            )?;

            let id = result
                .inserted_id
                .as_object_id()
                .ok_or(MongoStorageError::MissingInsertedId)?;
            info!(todo_id = %id, "inserted todo");

            Ok::<Todo, MongoStorageError>(Todo::new(
                TodoId::from(id.bytes()),
                &document.name,
                document.status,
            ))
        })
        .await
        .map_err(Into::into)
    }

    #[instrument(name = "MongoStorage::get_todo", skip_all)]
    async fn get(&self, todo_id: TodoId) -> Result<Todo, StorageError> {
        info!(todo_id = %todo_id, "get todo");

        measure_and_record_storage_async(STORAGE_KIND, "MongoStorage::get_todo", || async {
            let document = trace_err!(
                self.todos.find_one(doc! { "_id": object_id(&todo_id) }).await,
                "failed to read todo"
            )?
            .ok_or(MongoStorageError::NotFound)?;

            document.into_todo()
        })
        .await
        .map_err(Into::into)
    }

    #[instrument(name = "MongoStorage::get_all", skip_all)]
    async fn get_all(&self) -> Result<Vec<Todo>, StorageError> {
        info!("get all todos");

        measure_and_record_storage_async(STORAGE_KIND, "MongoStorage::get_all", || async {
            // Object ids start with the creation second, so `_id` order is
            // creation order.
            let cursor = trace_err!(
                self.todos.find(doc! {}).sort(doc! { "_id": 1 }).await,
                "failed to query todos"
            )?;

            let documents = trace_err!(
                cursor.try_collect::<Vec<MongoTodo>>().await,
                "failed to read todo cursor"
            )?;

            documents
                .into_iter()
                .map(MongoTodo::into_todo)
                .collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(Into::into)
    }

    #[instrument(name = "MongoStorage::update_todo", skip_all)]
    async fn update(&self, todo_id: TodoId, fields: TodoFields) -> Result<Todo, StorageError> {
        info!(todo_id = %todo_id, "update todo");

        measure_and_record_storage_async(STORAGE_KIND, "MongoStorage::update_todo", || async {
            let update = doc! {
                "$set": {
                    "name": fields.name.as_str(),
                    "status": i32::from(u8::from(fields.status)),
                }
            };

            let document = trace_err!(
                self.todos
                    .find_one_and_update(doc! { "_id": object_id(&todo_id) }, update)
                    .return_document(ReturnDocument::After)
                    .await,
                "failed to update todo"
            )?;

            match document {
                Some(document) => document.into_todo(),
                None => {
                    warn!(todo_id = %todo_id, "failed to find todo in the storage");
                    Err(MongoStorageError::NotFound)
                }
            }
        })
        .await
        .map_err(Into::into)
    }

    #[instrument(name = "MongoStorage::delete_todo", skip_all)]
    async fn delete(&self, todo_id: TodoId) -> Result<(), StorageError> {
        info!(todo_id = %todo_id, "delete todo");

        measure_and_record_storage_async(STORAGE_KIND, "MongoStorage::delete_todo", || async {
            let result = trace_err!(
                self.todos.delete_one(doc! { "_id": object_id(&todo_id) }).await,
                "failed to delete todo"
            )?;

            if result.deleted_count == 0 {
                warn!(todo_id = %todo_id, "Tried to remove non-existing todo");
                return Err(MongoStorageError::NoContent);
            }

            Ok(())
        })
        .await
        .map_err(Into::into)
    }
}
