//! Storage entity traits and types

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be used as storage keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key as a string for storage backends that require string keys
    fn as_str(&self) -> &str;
}

/// Trait for documents that can be stored
///
/// Entities are persisted as JSON documents, so every stored type must
/// round-trip through serde.
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this entity
    type Key: StorageKey;

    /// Returns the entity's key
    fn key(&self) -> &Self::Key;
}

/// Generate a fresh document identifier (32 lowercase hex characters)
pub fn generate_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
