//! In-memory storage implementation

use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory document store
///
/// Documents are kept in insertion order so listings come back oldest first,
/// matching the PostgreSQL backend. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<Vec<E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(Vec::new()),
        }
    }

    /// Creates storage pre-populated with entities, later duplicates win
    pub fn with_entities(entities: Vec<E>) -> Self {
        let mut stored: Vec<E> = Vec::with_capacity(entities.len());

        for entity in entities {
            match stored
                .iter()
                .position(|e| e.key().as_str() == entity.key().as_str())
            {
                Some(i) => stored[i] = entity,
                None => stored.push(entity),
            }
        }

        Self {
            entities: RwLock::new(stored),
        }
    }

    fn position(entities: &[E], key: &str) -> Option<usize> {
        entities.iter().position(|e| e.key().as_str() == key)
    }

    fn read_error(e: impl std::fmt::Display) -> DomainError {
        DomainError::storage(format!("Failed to acquire read lock: {}", e))
    }

    fn write_error(e: impl std::fmt::Display) -> DomainError {
        DomainError::storage(format!("Failed to acquire write lock: {}", e))
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self.entities.read().map_err(Self::read_error)?;

        Ok(Self::position(&entities, key.as_str()).map(|i| entities[i].clone()))
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entities = self.entities.read().map_err(Self::read_error)?;

        Ok(entities.clone())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let mut entities = self.entities.write().map_err(Self::write_error)?;

        if Self::position(&entities, entity.key().as_str()).is_some() {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                entity.key().as_str()
            )));
        }

        entities.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let mut entities = self.entities.write().map_err(Self::write_error)?;

        let Some(i) = Self::position(&entities, entity.key().as_str()) else {
            return Err(DomainError::not_found(format!(
                "Entity with key '{}' not found",
                entity.key().as_str()
            )));
        };

        entities[i] = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let mut entities = self.entities.write().map_err(Self::write_error)?;

        match Self::position(&entities, key.as_str()) {
            Some(i) => {
                entities.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entities = self.entities.read().map_err(Self::read_error)?;

        Ok(entities.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    struct TestId(String);

    impl StorageKey for TestId {
        fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestEntity {
        id: TestId,
        name: String,
        value: i32,
    }

    impl StorageEntity for TestEntity {
        type Key = TestId;

        fn key(&self) -> &Self::Key {
            &self.id
        }
    }

    fn entity(id: &str, name: &str, value: i32) -> TestEntity {
        TestEntity {
            id: TestId(id.to_string()),
            name: name.to_string(),
            value,
        }
    }

    fn key(id: &str) -> TestId {
        TestId(id.to_string())
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage: InMemoryStorage<TestEntity> = InMemoryStorage::new();
        let e = entity("1", "Test", 42);

        storage.create(e.clone()).await.unwrap();

        let result = storage.get(&key("1")).await.unwrap();
        assert_eq!(result, Some(e));
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let storage: InMemoryStorage<TestEntity> = InMemoryStorage::new();
        let e = entity("1", "Test", 42);

        storage.create(e.clone()).await.unwrap();
        let result = storage.create(e).await;

        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update() {
        let storage: InMemoryStorage<TestEntity> = InMemoryStorage::new();
        storage.create(entity("1", "Test", 42)).await.unwrap();

        storage.update(entity("1", "Updated", 100)).await.unwrap();

        let result = storage.get(&key("1")).await.unwrap();
        assert_eq!(result.unwrap().name, "Updated");
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let storage: InMemoryStorage<TestEntity> = InMemoryStorage::new();

        let result = storage.update(entity("1", "Test", 42)).await;

        assert!(matches!(result.unwrap_err(), DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let storage: InMemoryStorage<TestEntity> = InMemoryStorage::new();
        storage.create(entity("1", "Test", 42)).await.unwrap();

        assert!(storage.delete(&key("1")).await.unwrap());
        assert!(!storage.exists(&key("1")).await.unwrap());
        assert!(!storage.delete(&key("1")).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let storage: InMemoryStorage<TestEntity> = InMemoryStorage::new();

        storage.create(entity("c", "C", 3)).await.unwrap();
        storage.create(entity("a", "A", 1)).await.unwrap();
        storage.create(entity("b", "B", 2)).await.unwrap();
        storage.update(entity("a", "A2", 10)).await.unwrap();

        let names: Vec<String> = storage
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["C", "A2", "B"]);
    }

    #[tokio::test]
    async fn test_find_by_document_fields() {
        let storage = InMemoryStorage::with_entities(vec![
            entity("1", "Alpha", 1),
            entity("2", "Beta", 2),
            entity("3", "Alpha", 3),
        ]);

        let found = storage.find(&json!({"name": "Alpha"})).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].value, 3);

        let one = storage
            .find_one(&json!({"name": "Beta", "value": 2}))
            .await
            .unwrap();
        assert_eq!(one, Some(entity("2", "Beta", 2)));
    }

    #[tokio::test]
    async fn test_with_entities_and_count() {
        let storage = InMemoryStorage::with_entities(vec![
            entity("1", "A", 1),
            entity("2", "B", 2),
            entity("1", "A again", 3),
        ]);

        assert_eq!(storage.count().await.unwrap(), 2);
        assert_eq!(storage.get(&key("1")).await.unwrap().unwrap().value, 3);
    }
}
