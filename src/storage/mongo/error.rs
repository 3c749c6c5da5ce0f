use strum_macros::AsRefStr;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug, AsRefStr)]
pub enum MongoStorageError {
    #[error("Document not found")]
    NotFound,

    #[error("No document to delete")]
    NoContent,

    #[error("Inserted document has no object id")]
    MissingInsertedId,

    #[error("Stored document has no _id")]
    MissingDocumentId,

    #[error("MongoDB error")]
    Mongo(#[from] mongodb::error::Error),
}

impl From<MongoStorageError> for StorageError {
    fn from(value: MongoStorageError) -> Self {
        match value {
            MongoStorageError::NotFound => {
                tracing::warn!(error = ?value, error_type = %value.as_ref(), "Record not found by id");
                Self::NotFound
            }
            MongoStorageError::NoContent => {
                tracing::warn!(error = ?value, error_type = %value.as_ref(), "No content for id");
                Self::NoContent
            }
            _ => {
                tracing::error!(error = ?value, error_type = %value.as_ref(), "Storage error");
                Self::Mongo(value)
            }
        }
    }
}
