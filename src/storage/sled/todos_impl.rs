use crate::storage::sled::internal::TreeScan;
use crate::storage::TodoId;
use crate::trace_err;
use crate::utils::blocking_task_guard::BlockingTaskGuard;
use crate::utils::measure_metrics::measure_and_record_storage;

use super::error::SledStorageError;
use super::internal::{
    span_wrappers::{
        deserialize_in_span, deserialize_in_transaction_with_span,
        get_value_in_transaction_with_span, get_value_with_span,
        insert_new_value_with_span, insert_value_in_transaction_with_span,
        remove_value_with_span, serialize_in_span, serialize_in_transaction_with_span,
    },
    KeyPrefix, PrefixKind,
};
use super::{todo_key, FromBytesWithConfig, STORAGE_KIND};
use super::{BincodeConfig, SledStorage};
use super::{StorageError, Todo, TodoDocument, TodoFields, TodoStorage};
use async_trait::async_trait;
use sled::transaction::ConflictableTransactionResult;
use sled::Tree;
use tracing::{info, info_span, instrument, Span};

#[async_trait]
impl TodoStorage for SledStorage {
    #[instrument(name = "SledStorage::insert_todo", skip_all)]
    async fn insert(&self, fields: TodoFields) -> Result<Todo, StorageError> {
        let todo_id = TodoId::new();
        info!(todo_id = %todo_id, "insert todo");

        measure_and_record_storage(STORAGE_KIND, "SledStorage::insert_todo", || {
            let key = todo_key(&todo_id);

            let document = TodoDocument::from(fields);

            let encoded: Vec<u8> = trace_err!(
                serialize_in_span(&self.bincode_config, &document),
                "failed to bin encode todo"
            )?;

            trace_err!(
                insert_new_value_with_span(&key, &encoded, &self.todo_tree),
                "failed to write todo into storage"
            )?;

            Ok::<Todo, SledStorageError>(document.into_todo(todo_id))
        })
        .map_err(Into::into)
    }

    #[instrument(name = "SledStorage::get_todo", skip_all)]
    async fn get(&self, todo_id: TodoId) -> Result<Todo, StorageError> {
        info!(todo_id = %todo_id, "get todo");

        measure_and_record_storage(STORAGE_KIND, "SledStorage::get_todo", || {
            let key = todo_key(&todo_id);

            let value = trace_err!(
                get_value_with_span(&key, &self.todo_tree),
                "failed to read todo from storage"
            )?;

            Ok::<Todo, SledStorageError>(
                trace_err!(
                    deserialize_in_span::<TodoDocument>(&self.bincode_config, &value),
                    "failed to bin decode todo"
                )?
                .into_todo(todo_id),
            )
        })
        .map_err(Into::into)
    }

    #[instrument(name = "SledStorage::get_all", skip_all)]
    async fn get_all(&self) -> Result<Vec<Todo>, StorageError> {
        info!("get all todos");

        let result: Result<_, SledStorageError> =
            measure_and_record_storage(STORAGE_KIND, "SledStorage::get_all", || {
                info_span!("TreeScan::within::collect").in_scope(|| {
                    trace_err!(
                        TreeScan::within(&self.todo_tree, KeyPrefix::from_kind(PrefixKind::Todo))
                            .collect(&self.bincode_config, |key, bytes, config| {
                                let todo_id: TodoId = key
                                    .value()
                                    .parse()
                                    .map_err(|_| SledStorageError::InvalidKey(key.to_string()))?;
                                Ok(TodoDocument::from_bytes(bytes, config)?.into_todo(todo_id))
                            }),
                        "failed to do tree scan to get all todo-s"
                    )
                })
            });

        Ok(result?)
    }

    #[instrument(name = "SledStorage::update_todo", skip_all)]
    async fn update(&self, todo_id: TodoId, fields: TodoFields) -> Result<Todo, StorageError> {
        // cloning tree should be cheap: struct Tree{inner: Arc<TreeInner>}
        let (todo_tree, bincode_config) = info_span!("Cloning tree and config")
            .in_scope(|| (self.todo_tree.clone(), self.bincode_config));

        let span = Span::current();
        tokio::task::spawn_blocking(move || {
            let _guard = BlockingTaskGuard::new("update_todo");
            span.in_scope(|| update_todo(todo_id, fields, &todo_tree, &bincode_config))
        })
        .await?
    }

    #[instrument(name = "SledStorage::delete_todo", skip_all)]
    async fn delete(&self, todo_id: TodoId) -> Result<(), StorageError> {
        info!(todo_id = %todo_id, "delete todo");

        measure_and_record_storage(STORAGE_KIND, "SledStorage::delete_todo", || {
            let key = todo_key(&todo_id);

            trace_err!(
                remove_value_with_span(&key, &self.todo_tree),
                "failed to remove todo from storage"
            )
        })
        .map_err(Into::into)
    }
}

#[instrument(name = "update_todo", skip_all)]
fn update_todo(
    todo_id: TodoId,
    fields: TodoFields,
    todo_tree: &Tree,
    bincode_config: &BincodeConfig,
) -> Result<Todo, StorageError> {
    info!(todo_id = %todo_id, "update todo");

    let todo = measure_and_record_storage(
        STORAGE_KIND,
        "SledStorage::update_todo_in_transaction",
        || {
            todo_tree.transaction(|tx| -> ConflictableTransactionResult<Todo, SledStorageError> {
                let key = todo_key(&todo_id);
                let value = trace_err!(
                    get_value_in_transaction_with_span(&key, tx),
                    "failed to read todo from storage"
                )?;

                if let Some(value) = value {
                    let mut todo = trace_err!(
                        deserialize_in_transaction_with_span::<TodoDocument>(
                            bincode_config,
                            &value,
                        ),
                        "failed to bin decode todo"
                    )?
                    .into_todo(todo_id);

                    todo.apply(&fields);

                    let encoded = trace_err!(
                        serialize_in_transaction_with_span(
                            bincode_config,
                            &TodoDocument::from(todo.clone()),
                        ),
                        "failed to bin encode todo"
                    )?;

                    trace_err!(
                        insert_value_in_transaction_with_span(&key, &encoded, tx),
                        "failed to write todo into storage"
                    )?;

                    Ok(todo)
                } else {
                    tracing::warn!("failed to find todo in the storage");
                    Err(SledStorageError::NotFound.into())
                }
            })
        },
    )
    .map_err(SledStorageError::from)?;

    Ok(todo)
}
