use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    str::FromStr,
};

use serde::Deserialize;
use strum_macros::{AsRefStr, EnumString};

use crate::init::StartupError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StorageKind {
    #[strum(serialize = "mongodb", serialize = "mongodb+srv")]
    Mongo,
    Sled,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Mongo(MongoConfig),
    Sled(SledConfig),
    Memory,
}

fn default_database() -> String {
    "go_todos".to_string()
}

/// `db` is a storage location such as `mongodb://localhost:27017`,
/// `sled://data/todos` or `memory://`. `database` only applies to MongoDB.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub db: String,
    #[serde(default = "default_database")]
    pub database: String,
}

impl StorageSettings {
    pub fn backend(&self) -> Result<StorageBackend, StartupError> {
        let (scheme, location) = self
            .db
            .split_once("://")
            .unwrap_or((self.db.as_str(), ""));

        let kind = StorageKind::from_str(scheme)
            .map_err(|_| StartupError::UnsupportedStorage(scheme.to_string()))?;

        match kind {
            StorageKind::Mongo => Ok(StorageBackend::Mongo(MongoConfig {
                uri: self.db.clone(),
                database: self.database.clone(),
            })),
            StorageKind::Memory => Ok(StorageBackend::Memory),
            StorageKind::Sled if location.is_empty() => Err(StartupError::MissingStorageConfig(
                format!("{} path in '{}'", kind.as_ref(), self.db),
            )),
            StorageKind::Sled => Ok(StorageBackend::Sled(SledConfig {
                path: PathBuf::from(location),
            })),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SledConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub tracing_endpoint: String,
    pub tracing_sampling_rate: f64,
    pub metrics_endpoint: String,
    pub stdout_tracing: bool,
    pub tracing: bool,
    pub metrics: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(db: &str) -> StorageSettings {
        StorageSettings {
            db: db.to_string(),
            database: default_database(),
        }
    }

    #[test]
    fn sled_backend_from_db() {
        let backend = storage("sled://data/todos").backend().unwrap();
        assert_eq!(
            backend,
            StorageBackend::Sled(SledConfig {
                path: PathBuf::from("data/todos")
            })
        );

        let backend = storage("sled:///var/lib/todos").backend().unwrap();
        assert_eq!(
            backend,
            StorageBackend::Sled(SledConfig {
                path: PathBuf::from("/var/lib/todos")
            })
        );
    }

    #[test]
    fn memory_backend_from_db() {
        assert_eq!(storage("memory://").backend().unwrap(), StorageBackend::Memory);
        assert_eq!(storage("memory").backend().unwrap(), StorageBackend::Memory);
    }

    #[test]
    fn mongo_backend_from_db() {
        let backend = storage("mongodb://localhost:27017").backend().unwrap();
        assert_eq!(
            backend,
            StorageBackend::Mongo(MongoConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database: "go_todos".to_string(),
            })
        );

        let backend = storage("mongodb+srv://user:pw@cluster.example.net")
            .backend()
            .unwrap();
        assert!(matches!(backend, StorageBackend::Mongo(c) if c.uri.starts_with("mongodb+srv://")));
    }

    #[test]
    fn unsupported_db_scheme() {
        let result = storage("postgres://localhost:5432").backend();
        assert!(matches!(result, Err(StartupError::UnsupportedStorage(s)) if s == "postgres"));
    }

    #[test]
    fn sled_without_path() {
        let result = storage("sled://").backend();
        assert!(matches!(result, Err(StartupError::MissingStorageConfig(_))));
    }
}
