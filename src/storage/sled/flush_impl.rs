use super::error::SledStorageError;
use super::{SledStorage, STORAGE_KIND};
use crate::{
    storage::{
        sled::{internal::span_wrappers::flush_tree_in_span, SLED_TODO_TREE},
        FlushStorage, StorageError,
    },
    trace_err,
    utils::measure_metrics::measure_and_record_storage,
};
use async_trait::async_trait;
use tracing::instrument;

#[async_trait]
impl FlushStorage for SledStorage {
    #[instrument(name = "SledStorage::flush", skip_all)]
    async fn flush(&self) -> Result<(), StorageError> {
        measure_and_record_storage(STORAGE_KIND, "SledStorage::flush", || {
            trace_err!(
                flush_tree_in_span(&self.todo_tree, SLED_TODO_TREE),
                "failed to flush todo_tree"
            )?;

            Ok::<(), SledStorageError>(())
        })
        .map_err(Into::into)
    }
}
