//! Storage-backed teacher repository implementation

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::storage::Storage;
use crate::domain::teacher::{Teacher, TeacherId, TeacherRepository};
use crate::domain::team::normalize_mail;
use crate::domain::DomainError;

#[derive(Debug)]
pub struct StorageTeacherRepository {
    storage: Arc<dyn Storage<Teacher>>,
}

impl StorageTeacherRepository {
    pub fn new(storage: Arc<dyn Storage<Teacher>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl TeacherRepository for StorageTeacherRepository {
    async fn get(&self, id: &TeacherId) -> Result<Option<Teacher>, DomainError> {
        self.storage.get(id).await
    }

    async fn find_by_mail(&self, mail: &str) -> Result<Option<Teacher>, DomainError> {
        let mail = normalize_mail(mail);

        Ok(self
            .storage
            .list()
            .await?
            .into_iter()
            .find(|t| normalize_mail(t.educational_mail()) == mail))
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Teacher>, DomainError> {
        self.storage.find_one(&json!({ "userId": user_id })).await
    }

    async fn create(&self, teacher: Teacher) -> Result<Teacher, DomainError> {
        self.storage.create(teacher).await
    }

    async fn list(&self) -> Result<Vec<Teacher>, DomainError> {
        self.storage.list().await
    }
}
