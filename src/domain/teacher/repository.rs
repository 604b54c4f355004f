//! Teacher repository trait

use async_trait::async_trait;

use super::entity::{Teacher, TeacherId};
use crate::domain::DomainError;

/// Read access to teacher records, plus creation for seeding
#[async_trait]
pub trait TeacherRepository: Send + Sync + std::fmt::Debug {
    async fn get(&self, id: &TeacherId) -> Result<Option<Teacher>, DomainError>;

    /// Lookup by educational mail, ignoring case
    async fn find_by_mail(&self, mail: &str) -> Result<Option<Teacher>, DomainError>;

    /// Lookup by the identity provider's user id
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Teacher>, DomainError>;

    async fn create(&self, teacher: Teacher) -> Result<Teacher, DomainError>;

    async fn list(&self) -> Result<Vec<Teacher>, DomainError>;
}
