use crate::{
    config::types::StorageBackend,
    service::Service,
    storage::{FlushStorage, MemoryStorage, TodoStorage},
    Settings,
};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::storage::{MongoStorage, SledStorage};

use super::StartupError;

#[instrument(name = "init_storage", skip_all)]
pub async fn init_storage(settings: &Settings) -> Result<Service, StartupError> {
    let backend = settings.storage.backend()?;
    info!(backend = ?backend, "init storage");

    let service = match backend {
        StorageBackend::Mongo(mongo_config) => {
            let mongo_storage = Arc::new(
                MongoStorage::connect(&mongo_config)
                    .await
                    .map_err(StartupError::ConnectMongoStorage)?,
            );

            Service::new(
                mongo_storage.clone() as Arc<dyn TodoStorage>,
                mongo_storage as Arc<dyn FlushStorage>,
            )
        }
        StorageBackend::Sled(sled_config) => {
            let sled_storage = Arc::new(
                SledStorage::new(&sled_config).map_err(StartupError::OpenSledStorage)?,
            );

            Service::new(
                sled_storage.clone() as Arc<dyn TodoStorage>,
                sled_storage as Arc<dyn FlushStorage>,
            )
        }
        StorageBackend::Memory => {
            let memory_storage = Arc::new(MemoryStorage::new());

            Service::new(
                memory_storage.clone() as Arc<dyn TodoStorage>,
                memory_storage as Arc<dyn FlushStorage>,
            )
        }
    };

    Ok(service)
}
