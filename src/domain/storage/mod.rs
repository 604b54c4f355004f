//! Storage domain - document store abstraction

mod entity;
mod filter;
mod repository;

pub use entity::{generate_document_id, StorageEntity, StorageKey};
pub use filter::json_contains;
pub use repository::Storage;

#[cfg(test)]
pub use repository::mock;
