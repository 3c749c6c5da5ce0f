use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use super::{FlushStorage, StorageError, Todo, TodoFields, TodoId, TodoStorage};
use crate::utils::measure_metrics::measure_and_record_storage;

static STORAGE_KIND: &str = "memory";

/// Process-local backend. Items keep insertion order and lookups are a
/// linear scan over the list.
#[derive(Debug, Default)]
pub(crate) struct MemoryStorage {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStorage for MemoryStorage {
    #[instrument(name = "MemoryStorage::insert_todo", skip_all)]
    async fn insert(&self, fields: TodoFields) -> Result<Todo, StorageError> {
        let mut todos = self.todos.write().await;

        measure_and_record_storage(STORAGE_KIND, "MemoryStorage::insert_todo", || {
            let todo = Todo::new(TodoId::new(), &fields.name, fields.status);
            info!(todo_id = %todo.id, "insert todo");
            todos.push(todo.clone());
            Ok(todo)
        })
    }

    #[instrument(name = "MemoryStorage::get_todo", skip_all)]
    async fn get(&self, id: TodoId) -> Result<Todo, StorageError> {
        info!(todo_id = %id, "get todo");
        let todos = self.todos.read().await;

        measure_and_record_storage(STORAGE_KIND, "MemoryStorage::get_todo", || {
            todos
                .iter()
                .find(|todo| todo.id == id)
                .cloned()
                .ok_or(StorageError::NotFound)
        })
    }

    #[instrument(name = "MemoryStorage::get_all", skip_all)]
    async fn get_all(&self) -> Result<Vec<Todo>, StorageError> {
        let todos = self.todos.read().await;

        measure_and_record_storage(STORAGE_KIND, "MemoryStorage::get_all", || {
            info!(count = todos.len(), "get all todos");
            Ok(todos.clone())
        })
    }

    #[instrument(name = "MemoryStorage::update_todo", skip_all)]
    async fn update(&self, id: TodoId, fields: TodoFields) -> Result<Todo, StorageError> {
        info!(todo_id = %id, "update todo");
        let mut todos = self.todos.write().await;

        measure_and_record_storage(STORAGE_KIND, "MemoryStorage::update_todo", || {
            match todos.iter_mut().find(|todo| todo.id == id) {
                Some(todo) => {
                    todo.apply(&fields);
                    Ok(todo.clone())
                }
                None => {
                    warn!(todo_id = %id, "failed to find todo in the storage");
                    Err(StorageError::NotFound)
                }
            }
        })
    }

    #[instrument(name = "MemoryStorage::delete_todo", skip_all)]
    async fn delete(&self, id: TodoId) -> Result<(), StorageError> {
        info!(todo_id = %id, "delete todo");
        let mut todos = self.todos.write().await;

        measure_and_record_storage(STORAGE_KIND, "MemoryStorage::delete_todo", || {
            let before = todos.len();
            todos.retain(|todo| todo.id != id);

            if todos.len() == before {
                warn!(todo_id = %id, "Tried to remove non-existing todo");
                Err(StorageError::NoContent)
            } else {
                Ok(())
            }
        })
    }
}

#[async_trait]
impl FlushStorage for MemoryStorage {
    async fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
