//! Storage infrastructure - Storage implementations

mod factory;
mod in_memory;
mod postgres;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryStorage;
pub use postgres::{PostgresConfig, PostgresStorage};

/// Table names for each collection
pub mod collections {
    pub const TEAMS: &str = "teams";
    pub const TEACHERS: &str = "teachers";
    pub const SUBMISSIONS: &str = "submitted_files";
}
