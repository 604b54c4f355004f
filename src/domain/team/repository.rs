//! Team repository trait

use async_trait::async_trait;

use super::entity::{Team, TeamId};
use crate::domain::teacher::Teacher;
use crate::domain::DomainError;

/// Repository for managing teams
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by ID
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// Get a team by its exact name
    async fn find_by_name(&self, team_name: &str) -> Result<Option<Team>, DomainError>;

    /// Teams (other than `exclude`) that already hold any of `mails`
    async fn find_with_member_mails(
        &self,
        mails: &[String],
        exclude: Option<&TeamId>,
    ) -> Result<Vec<Team>, DomainError>;

    /// Teams supervised by `teacher`
    async fn find_by_teacher(&self, teacher: &Teacher) -> Result<Vec<Team>, DomainError>;

    /// Create a new team
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Update an existing team
    async fn update(&self, team: Team) -> Result<Team, DomainError>;

    /// Delete a team by ID
    async fn delete(&self, id: &TeamId) -> Result<bool, DomainError>;

    /// List all teams
    async fn list(&self) -> Result<Vec<Team>, DomainError>;

    /// Check if a team exists
    async fn exists(&self, id: &TeamId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}
