//! Storage-backed team repository implementation

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::storage::Storage;
use crate::domain::teacher::Teacher;
use crate::domain::team::{normalize_mail, Team, TeamId, TeamRepository};
use crate::domain::DomainError;

/// Storage-backed implementation of TeamRepository
#[derive(Debug)]
pub struct StorageTeamRepository {
    storage: Arc<dyn Storage<Team>>,
}

impl StorageTeamRepository {
    pub fn new(storage: Arc<dyn Storage<Team>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl TeamRepository for StorageTeamRepository {
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        self.storage.get(id).await
    }

    async fn find_by_name(&self, team_name: &str) -> Result<Option<Team>, DomainError> {
        self.storage
            .find_one(&json!({ "teamName": team_name.trim() }))
            .await
    }

    async fn find_with_member_mails(
        &self,
        mails: &[String],
        exclude: Option<&TeamId>,
    ) -> Result<Vec<Team>, DomainError> {
        if mails.is_empty() {
            return Ok(Vec::new());
        }

        // Stored mails keep their original casing, so compare in memory
        let wanted: HashSet<String> = mails.iter().map(|m| normalize_mail(m)).collect();

        Ok(self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|team| exclude != Some(team.id()))
            .filter(|team| team.member_mails().any(|m| wanted.contains(&normalize_mail(m))))
            .collect())
    }

    async fn find_by_teacher(&self, teacher: &Teacher) -> Result<Vec<Team>, DomainError> {
        Ok(self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|team| team.is_supervised_by(teacher))
            .collect())
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        self.storage.create(team).await
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        self.storage.update(team).await
    }

    async fn delete(&self, id: &TeamId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        self.storage.list().await
    }

    async fn exists(&self, id: &TeamId) -> Result<bool, DomainError> {
        self.storage.exists(id).await
    }
}
