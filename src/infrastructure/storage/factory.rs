//! Storage factory for runtime backend selection

use std::sync::Arc;

use sqlx::postgres::PgPool;
use tracing::info;

use crate::config::StorageSettings;
use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::postgres::{PostgresConfig, PostgresStorage};

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    InMemory,
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    /// Resolve the configured backend name into a concrete configuration
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, DomainError> {
        match StorageType::from_str(&settings.backend) {
            Some(StorageType::InMemory) => Ok(Self::InMemory),
            Some(StorageType::Postgres) => Ok(Self::Postgres(PostgresConfig::from_settings(
                &settings.postgres,
            )?)),
            None => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                settings.backend
            ))),
        }
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Hands out one storage per collection from a shared backend
#[derive(Debug, Clone)]
pub enum StorageFactory {
    InMemory,
    Postgres(PgPool),
}

impl StorageFactory {
    /// Connect to the configured backend
    pub async fn connect(config: &StorageConfig) -> Result<Self, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory storage");
                Ok(Self::InMemory)
            }
            StorageConfig::Postgres(pg_config) => {
                info!(
                    max_connections = pg_config.max_connections,
                    "Connecting to PostgreSQL storage"
                );
                Ok(Self::Postgres(pg_config.connect().await?))
            }
        }
    }

    /// Storage for one collection, creating its table when needed
    pub async fn collection<E>(&self, table_name: &str) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        match self {
            Self::InMemory => Ok(Arc::new(InMemoryStorage::<E>::new())),
            Self::Postgres(pool) => {
                let storage = PostgresStorage::<E>::new(pool.clone(), table_name);
                storage.ensure_table().await?;
                Ok(Arc::new(storage))
            }
        }
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}
