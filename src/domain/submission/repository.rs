//! Submission repository trait

use async_trait::async_trait;

use super::entity::{SubmissionId, SubmittedFile};
use crate::domain::teacher::TeacherId;
use crate::domain::DomainError;

#[async_trait]
pub trait SubmissionRepository: Send + Sync + std::fmt::Debug {
    async fn get(&self, id: &SubmissionId) -> Result<Option<SubmittedFile>, DomainError>;

    async fn create(&self, file: SubmittedFile) -> Result<SubmittedFile, DomainError>;

    async fn update(&self, file: SubmittedFile) -> Result<SubmittedFile, DomainError>;

    /// All submissions, oldest first
    async fn list(&self) -> Result<Vec<SubmittedFile>, DomainError>;

    /// Submissions addressed to one teacher
    async fn find_by_teacher(
        &self,
        teacher_id: &TeacherId,
    ) -> Result<Vec<SubmittedFile>, DomainError>;
}
