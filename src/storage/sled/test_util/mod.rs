#![allow(dead_code)]
use std::sync::Arc;

use crate::storage::{FlushStorage, MemoryStorage, TodoFields, TodoStatus, TodoStorage};
use sled::Config;

use super::SledStorage;

pub struct TestStorageBuilder {
    todos: Vec<TodoFields>,
    todo_storage: Arc<dyn TodoStorage>,
    flush_storage: Arc<dyn FlushStorage>,
}

impl TestStorageBuilder {
    /// Backed by a temporary sled database that is removed on drop.
    pub fn new() -> Self {
        let config = Config::new().temporary(true);
        let db = config.open().unwrap();
        let sled_storage = Arc::new(SledStorage::from_db(&db).unwrap());
        Self {
            todos: Vec::new(),
            todo_storage: sled_storage.clone() as Arc<dyn TodoStorage>,
            flush_storage: sled_storage as Arc<dyn FlushStorage>,
        }
    }

    pub fn in_memory() -> Self {
        let memory_storage = Arc::new(MemoryStorage::new());
        Self {
            todos: Vec::new(),
            todo_storage: memory_storage.clone() as Arc<dyn TodoStorage>,
            flush_storage: memory_storage as Arc<dyn FlushStorage>,
        }
    }

    pub fn with_todos(mut self, count: usize) -> Self {
        self.todos = (0..count)
            .map(|i| TodoFields {
                name: format!("todo {}", i),
                status: TodoStatus::NotStarted,
            })
            .collect();
        self
    }

    pub async fn build_todo(&self) -> Arc<dyn TodoStorage> {
        for todo in &self.todos {
            self.todo_storage.insert(todo.clone()).await.unwrap();
        }

        self.todo_storage.clone()
    }

    pub async fn build_flush(&self) -> Arc<dyn FlushStorage> {
        self.flush_storage.clone()
    }
}

impl Default for TestStorageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
