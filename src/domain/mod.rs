//! Domain layer - Core business logic and entities

pub mod error;
pub mod storage;
pub mod submission;
pub mod teacher;
pub mod team;

pub use error::DomainError;
pub use storage::{Storage, StorageEntity, StorageKey};
pub use submission::{SubmissionId, SubmissionStatus, SubmittedFile};
pub use teacher::{Teacher, TeacherId};
pub use team::{Member, Team, TeamId};
