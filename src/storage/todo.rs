use super::{StorageError, TodoId};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use utoipa::ToSchema;

#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, AsRefStr,
)]
#[serde(try_from = "u8", into = "u8")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoStatus {
    #[default]
    NotStarted,
    InProgress,
    Done,
}

impl TryFrom<u8> for TodoStatus {
    type Error = StorageError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NotStarted),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Done),
            other => Err(StorageError::InvalidStatus(other)),
        }
    }
}

impl From<TodoStatus> for u8 {
    fn from(value: TodoStatus) -> Self {
        match value {
            TodoStatus::NotStarted => 0,
            TodoStatus::InProgress => 1,
            TodoStatus::Done => 2,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Todo {
    #[schema(value_type = String)]
    pub id: TodoId,
    pub name: String,
    #[schema(value_type = u8)]
    pub status: TodoStatus,
}

impl Todo {
    pub(crate) fn new(id: TodoId, name: &str, status: TodoStatus) -> Self {
        Self {
            id,
            name: name.to_owned(),
            status,
        }
    }

    pub(crate) fn apply(&mut self, fields: &TodoFields) {
        self.name.clone_from(&fields.name);
        self.status = fields.status;
    }
}

/// Caller-supplied part of a todo; the id always comes from the store.
#[derive(Debug, Clone)]
pub struct TodoFields {
    pub name: String,
    pub status: TodoStatus,
}

/// Stored form of a todo. The id lives in the document key, not in the
/// value.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub(crate) struct TodoDocument {
    pub name: String,
    pub status: TodoStatus,
}

impl TodoDocument {
    pub(crate) fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            name: self.name,
            status: self.status,
        }
    }
}

impl From<TodoFields> for TodoDocument {
    fn from(value: TodoFields) -> Self {
        Self {
            name: value.name,
            status: value.status,
        }
    }
}

impl From<Todo> for TodoDocument {
    fn from(value: Todo) -> Self {
        Self {
            name: value.name,
            status: value.status,
        }
    }
}
