pub(crate) mod types;

use std::net::SocketAddr;

use config::{Config, Environment, File};
use serde::Deserialize;
pub(crate) use types::{ServerConfig, StorageSettings, TelemetryConfig};

use crate::{init::StartupError, trace_err};

pub(crate) static PORT_ENV: &str = "PORT";
pub(crate) static DB_ENV: &str = "DB";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub(crate) storage: StorageSettings,
    pub(crate) telemetry: TelemetryConfig,
    pub(crate) server: ServerConfig,
}

impl Settings {
    pub fn new() -> Result<Self, StartupError> {
        dotenv::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or("development".into());

        Settings::from_file(&run_mode)
    }

    /// Layers `config/default`, `config/<file_name>`, `APP__*` variables and
    /// finally the `PORT` and `DB` variables.
    pub fn from_file(file_name: &str) -> Result<Self, StartupError> {
        trace_err!(
            Config::builder()
                .add_source(File::with_name("config/default"))
                .add_source(File::with_name(&format!("config/{file_name}")).required(false))
                .add_source(Environment::with_prefix("APP").separator("__"))
                .set_override_option("server.port", std::env::var(PORT_ENV).ok())?
                .set_override_option("storage.db", std::env::var(DB_ENV).ok())?
                .build()?
                .try_deserialize(),
            "failed to build app settings"
        )
        .map_err(Into::into)
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server.addr()
    }

    pub fn tracing_enabled(&self) -> bool {
        self.telemetry.tracing
    }

    pub fn metrics_enabled(&self) -> bool {
        self.telemetry.metrics
    }

    pub fn stdout_tracing_enabled(&self) -> bool {
        self.telemetry.stdout_tracing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{MongoConfig, StorageBackend};
    use serial_test::serial;

    /// Sets or clears an environment variable for the scope of a test and
    /// puts the previous value back on drop.
    struct EnvVarGuard {
        name: &'static str,
        previous: Option<String>,
    }

    impl EnvVarGuard {
        fn set(name: &'static str, value: Option<&str>) -> Self {
            let previous = std::env::var(name).ok();
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
            Self { name, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            match &self.previous {
                Some(value) => std::env::set_var(self.name, value),
                None => std::env::remove_var(self.name),
            }
        }
    }

    #[test]
    #[serial]
    fn test_settings_use_memory_storage() {
        let _db = EnvVarGuard::set(DB_ENV, None);
        let settings = Settings::from_file("test").unwrap();

        assert_eq!(settings.storage.backend().unwrap(), StorageBackend::Memory);
        assert!(!settings.tracing_enabled());
        assert!(!settings.metrics_enabled());
    }

    #[test]
    #[serial]
    fn default_port() {
        let _port = EnvVarGuard::set(PORT_ENV, None);
        let settings = Settings::from_file("test").unwrap();
        assert_eq!(settings.server_addr().port(), 8090);
    }

    #[test]
    #[serial]
    fn default_db_is_local_mongo() {
        let _db = EnvVarGuard::set(DB_ENV, None);
        let settings = Settings::from_file("default").unwrap();

        assert_eq!(
            settings.storage.backend().unwrap(),
            StorageBackend::Mongo(MongoConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database: "go_todos".to_string(),
            })
        );
    }

    #[test]
    #[serial]
    fn port_env_overrides_config() {
        let _port = EnvVarGuard::set(PORT_ENV, Some("9123"));
        let settings = Settings::from_file("test").unwrap();
        assert_eq!(settings.server_addr().port(), 9123);
    }

    #[test]
    #[serial]
    fn db_env_overrides_config() {
        let _db = EnvVarGuard::set(DB_ENV, Some("memory://"));
        let settings = Settings::from_file("default").unwrap();
        assert_eq!(settings.storage.backend().unwrap(), StorageBackend::Memory);

        let _db = EnvVarGuard::set(DB_ENV, Some("mongodb://db.internal:27017"));
        let settings = Settings::from_file("test").unwrap();
        assert!(matches!(
            settings.storage.backend().unwrap(),
            StorageBackend::Mongo(config) if config.uri == "mongodb://db.internal:27017"
        ));
    }

    #[test]
    #[serial]
    fn invalid_port_env_fails_to_load() {
        let _port = EnvVarGuard::set(PORT_ENV, Some("not-a-port"));
        assert!(matches!(
            Settings::from_file("test"),
            Err(StartupError::LoadConfig(_))
        ));
    }
}
