pub(super) mod error;
mod todos_impl;

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Client, Collection,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{FlushStorage, StorageError, Todo, TodoId, TodoStatus};
use crate::{
    config::types::MongoConfig, trace_err,
    utils::measure_metrics::measure_and_record_storage_async,
};
use error::MongoStorageError;

pub(crate) static MONGO_TODO_COLLECTION: &str = "todos";
pub(crate) static STORAGE_KIND: &str = "mongodb";

/// Shape of a todo in the `todos` collection. `_id` is left out on insert
/// so the driver assigns a fresh object id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MongoTodo {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    status: TodoStatus,
}

impl MongoTodo {
    fn into_todo(self) -> Result<Todo, MongoStorageError> {
        let id = self.id.ok_or(MongoStorageError::MissingDocumentId)?;
        Ok(Todo::new(TodoId::from(id.bytes()), &self.name, self.status))
    }
}

fn object_id(todo_id: &TodoId) -> ObjectId {
    ObjectId::from_bytes(todo_id.bytes())
}

/// Document-store backend on a MongoDB collection.
pub(crate) struct MongoStorage {
    todos: Collection<MongoTodo>,
}

impl MongoStorage {
    /// Connects and pings the server so a bad `DB` fails at startup rather
    /// than on the first request.
    #[instrument(name = "MongoStorage::connect", skip_all, fields(database = %mongo_config.database))]
    pub async fn connect(mongo_config: &MongoConfig) -> Result<Self, MongoStorageError> {
        measure_and_record_storage_async(STORAGE_KIND, "MongoStorage::connect", || async {
            let client = trace_err!(
                Client::with_uri_str(&mongo_config.uri).await,
                "failed to build mongodb client"
            )?;

            let database = client.database(&mongo_config.database);
            trace_err!(
                database.run_command(doc! { "ping": 1 }).await,
                "failed to ping mongodb"
            )?;

            info!("connected to mongodb");

            Ok::<Self, MongoStorageError>(Self {
                todos: database.collection(MONGO_TODO_COLLECTION),
            })
        })
        .await
    }
}

#[async_trait]
impl FlushStorage for MongoStorage {
    // Writes are acknowledged by the server, nothing is buffered locally.
    async fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_id_matches_todo_id_hex() {
        let todo_id = TodoId::new();
        assert_eq!(object_id(&todo_id).to_hex(), todo_id.to_string());

        let oid = ObjectId::new();
        assert_eq!(TodoId::from(oid.bytes()).to_string(), oid.to_hex());
    }

    #[test]
    fn new_document_has_no_id_and_integer_status() {
        let document = MongoTodo {
            id: None,
            name: "Buy milk".to_string(),
            status: TodoStatus::Done,
        };

        let bson = mongodb::bson::to_document(&document).unwrap();
        assert!(!bson.contains_key("_id"));
        assert_eq!(bson.get_str("name").unwrap(), "Buy milk");
        assert_eq!(bson.get_i32("status").unwrap(), 2);
    }

    #[test]
    fn stored_document_into_todo() {
        let oid = ObjectId::new();
        let stored = doc! { "_id": oid, "name": "Walk dog", "status": 1 };

        let document: MongoTodo = mongodb::bson::from_document(stored).unwrap();
        let todo = document.into_todo().unwrap();

        assert_eq!(todo.id.to_string(), oid.to_hex());
        assert_eq!(todo.name, "Walk dog");
        assert_eq!(todo.status, TodoStatus::InProgress);
    }

    #[test]
    fn stored_document_with_bad_status_is_rejected() {
        let stored = doc! { "_id": ObjectId::new(), "name": "Walk dog", "status": 7 };
        assert!(mongodb::bson::from_document::<MongoTodo>(stored).is_err());
    }

    #[test]
    fn document_without_id_is_an_error() {
        let document = MongoTodo {
            id: None,
            name: "Buy milk".to_string(),
            status: TodoStatus::NotStarted,
        };
        assert!(matches!(
            document.into_todo(),
            Err(MongoStorageError::MissingDocumentId)
        ));
    }
}
