//! Storage-backed submission repository implementation

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::storage::Storage;
use crate::domain::submission::{SubmissionId, SubmissionRepository, SubmittedFile};
use crate::domain::teacher::TeacherId;
use crate::domain::DomainError;

#[derive(Debug)]
pub struct StorageSubmissionRepository {
    storage: Arc<dyn Storage<SubmittedFile>>,
}

impl StorageSubmissionRepository {
    pub fn new(storage: Arc<dyn Storage<SubmittedFile>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl SubmissionRepository for StorageSubmissionRepository {
    async fn get(&self, id: &SubmissionId) -> Result<Option<SubmittedFile>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, file: SubmittedFile) -> Result<SubmittedFile, DomainError> {
        self.storage.create(file).await
    }

    async fn update(&self, file: SubmittedFile) -> Result<SubmittedFile, DomainError> {
        self.storage.update(file).await
    }

    async fn list(&self) -> Result<Vec<SubmittedFile>, DomainError> {
        self.storage.list().await
    }

    async fn find_by_teacher(
        &self,
        teacher_id: &TeacherId,
    ) -> Result<Vec<SubmittedFile>, DomainError> {
        self.storage
            .find(&json!({ "teacherId": teacher_id.as_str() }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::submission::NewSubmission;
    use crate::infrastructure::storage::InMemoryStorage;

    fn file(teacher: &str, project: &str) -> SubmittedFile {
        SubmittedFile::new(
            SubmissionId::generate(),
            NewSubmission {
                project_name: project.to_string(),
                filename: "report.pdf".to_string(),
                downloadurl: "https://files.example.edu/report.pdf".to_string(),
                team_name: "Alpha".to_string(),
                intake: "49".to_string(),
                teacher_id: teacher.to_string(),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_find_by_teacher() {
        let repo = StorageSubmissionRepository::new(Arc::new(InMemoryStorage::new()));

        repo.create(file("t-1", "First")).await.unwrap();
        repo.create(file("t-2", "Second")).await.unwrap();
        repo.create(file("t-1", "Third")).await.unwrap();

        let found = repo
            .find_by_teacher(&TeacherId::new("t-1").unwrap())
            .await
            .unwrap();
        let names: Vec<&str> = found.iter().map(|f| f.project_name()).collect();
        assert_eq!(names, vec!["First", "Third"]);
        assert_eq!(repo.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_persists_review() {
        let repo = StorageSubmissionRepository::new(Arc::new(InMemoryStorage::new()));
        let mut created = repo.create(file("t-1", "First")).await.unwrap();

        created.approve().unwrap();
        repo.update(created.clone()).await.unwrap();

        let stored = repo.get(created.id()).await.unwrap().unwrap();
        assert!(stored.is_public());
    }
}
