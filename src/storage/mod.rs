mod error;
mod ids;
mod memory;
mod mongo;
mod sled;
mod todo;

#[cfg(feature = "integration_tests")]
pub use sled::test_util;
pub(crate) use mongo::{error::MongoStorageError, MongoStorage};
pub(crate) use sled::{error::SledStartupError, SledStorage};

use async_trait::async_trait;
pub(crate) use error::StorageError;
pub(crate) use memory::MemoryStorage;
pub(crate) use todo::TodoFields;
pub use todo::{Todo, TodoStatus};

pub use ids::TodoId;

#[async_trait]
pub trait TodoStorage: Send + Sync {
    async fn insert(&self, fields: TodoFields) -> Result<Todo, StorageError>;
    async fn get(&self, id: TodoId) -> Result<Todo, StorageError>;
    async fn get_all(&self) -> Result<Vec<Todo>, StorageError>;
    async fn update(&self, id: TodoId, fields: TodoFields) -> Result<Todo, StorageError>;
    async fn delete(&self, id: TodoId) -> Result<(), StorageError>;
}

#[async_trait]
pub trait FlushStorage: Send + Sync {
    async fn flush(&self) -> Result<(), StorageError>;
}
