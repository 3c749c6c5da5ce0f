use thiserror::Error;

pub use super::mongo::error::MongoStorageError;
pub use super::sled::error::SledStorageError;
use strum_macros::AsRefStr;

#[derive(Error, Debug, AsRefStr)]
pub enum StorageError {
    #[error("Not found")]
    NotFound,

    #[error("No content")]
    NoContent,

    #[error("Failed to parse id from string")]
    ParseIdFromString(#[source] hex::FromHexError),

    #[error("Invalid todo status: {0}")]
    InvalidStatus(u8),

    #[error("Internal storage error")]
    Internal(#[source] SledStorageError),

    #[error("MongoDB storage error")]
    Mongo(#[source] MongoStorageError),

    #[error("Blocking task join error")]
    JoinError(#[from] tokio::task::JoinError),
}
