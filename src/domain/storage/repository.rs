//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::DomainError;

use super::entity::StorageEntity;
use super::filter::json_contains;

/// Generic document store for CRUD operations on any entity type
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all entities in insertion order
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Retrieves every entity whose JSON document contains `filter`
    async fn find(&self, filter: &Value) -> Result<Vec<E>, DomainError> {
        let mut matches = Vec::new();

        for entity in self.list().await? {
            let document = serde_json::to_value(&entity).map_err(|e| {
                DomainError::storage(format!("Failed to serialize entity: {}", e))
            })?;

            if json_contains(&document, filter) {
                matches.push(entity);
            }
        }

        Ok(matches)
    }

    /// Retrieves the first entity matching `filter`
    async fn find_one(&self, filter: &Value) -> Result<Option<E>, DomainError> {
        Ok(self.find(filter).await?.into_iter().next())
    }

    /// Creates a new entity, returns error if already exists
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Updates an existing entity, returns error if not found
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Deletes an entity by its key, returns true if deleted
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;

    /// Checks if an entity exists by its key
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}
