//! Submission service: intake and teacher review

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::submission::{
    NewSubmission, SubmissionError, SubmissionId, SubmissionRepository, SubmittedFile,
};
use crate::domain::teacher::TeacherRepository;
use crate::domain::DomainError;

pub const SUBMISSION_FIELDS_REQUIRED: &str =
    "projectName,filename, downloadurl, teamName,intake and teacherId are required.";

#[derive(Debug)]
pub struct SubmissionService<R: SubmissionRepository> {
    repository: Arc<R>,
    teachers: Arc<dyn TeacherRepository>,
}

impl<R: SubmissionRepository> SubmissionService<R> {
    pub fn new(repository: Arc<R>, teachers: Arc<dyn TeacherRepository>) -> Self {
        Self {
            repository,
            teachers,
        }
    }

    /// Record a new pending submission
    pub async fn create(&self, input: NewSubmission) -> Result<SubmittedFile, DomainError> {
        info!(
            project = %input.project_name,
            team = %input.team_name,
            "Creating submission"
        );

        let required = [
            &input.project_name,
            &input.filename,
            &input.downloadurl,
            &input.team_name,
            &input.intake,
            &input.teacher_id,
        ];

        if required.iter().any(|value| value.trim().is_empty()) {
            warn!("Submission is missing required fields");
            return Err(DomainError::validation(SUBMISSION_FIELDS_REQUIRED));
        }

        let file =
            SubmittedFile::new(SubmissionId::generate(), input).map_err(DomainError::field_errors)?;

        self.repository.create(file).await
    }

    /// All submissions, oldest first
    pub async fn list(&self) -> Result<Vec<SubmittedFile>, DomainError> {
        debug!("Listing submissions");
        self.repository.list().await
    }

    /// Submissions addressed to the teacher linked to `user_id`
    pub async fn list_for_teacher(&self, user_id: &str) -> Result<Vec<SubmittedFile>, DomainError> {
        debug!(user_id = %user_id, "Listing submissions for teacher");

        let teacher = self
            .teachers
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Teacher not found"))?;

        self.repository.find_by_teacher(teacher.id()).await
    }

    /// Approve and publish a submission
    pub async fn approve(&self, id: &str) -> Result<SubmittedFile, DomainError> {
        info!(id = %id, "Approving submission");

        let mut file = self.fetch(id).await?;
        file.approve().map_err(reject)?;

        self.repository.update(file).await
    }

    /// Decline a submission with optional feedback
    pub async fn decline(
        &self,
        id: &str,
        message: Option<&str>,
    ) -> Result<SubmittedFile, DomainError> {
        info!(id = %id, "Declining submission");

        let mut file = self.fetch(id).await?;
        file.decline(message).map_err(reject)?;

        self.repository.update(file).await
    }

    async fn fetch(&self, id: &str) -> Result<SubmittedFile, DomainError> {
        let submission_id =
            SubmissionId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        self.repository
            .get(&submission_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Submission not found."))
    }
}

fn reject(error: SubmissionError) -> DomainError {
    warn!(error = %error, "Rejected review transition");
    DomainError::validation(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::mock::MockStorage;
    use crate::domain::submission::{SubmissionStatus, DEFAULT_DECLINE_MESSAGE};
    use crate::domain::teacher::{Teacher, TeacherId};
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::submission::StorageSubmissionRepository;
    use crate::infrastructure::teacher::StorageTeacherRepository;

    fn teachers() -> Arc<dyn TeacherRepository> {
        let teacher = Teacher::new(
            TeacherId::new("t-1").unwrap(),
            "Dr. Rahman",
            "rahman@cse.bubt.edu.bd",
            "user-1",
        )
        .unwrap();

        Arc::new(StorageTeacherRepository::new(Arc::new(
            InMemoryStorage::with_entities(vec![teacher]),
        )))
    }

    fn create_service() -> SubmissionService<StorageSubmissionRepository> {
        let storage = Arc::new(InMemoryStorage::<SubmittedFile>::new());
        SubmissionService::new(
            Arc::new(StorageSubmissionRepository::new(storage)),
            teachers(),
        )
    }

    fn input(teacher_id: &str) -> NewSubmission {
        NewSubmission {
            project_name: "Smart Campus".to_string(),
            filename: "report.pdf".to_string(),
            downloadurl: "https://files.example.edu/report.pdf".to_string(),
            team_name: "Alpha".to_string(),
            intake: "49".to_string(),
            teacher_id: teacher_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_is_pending_and_private() {
        let service = create_service();

        let file = service.create(input("t-1")).await.unwrap();

        assert_eq!(file.status(), SubmissionStatus::Pending);
        assert!(!file.is_public());
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_requires_every_field() {
        let service = create_service();
        let mut incomplete = input("t-1");
        incomplete.downloadurl = " ".to_string();

        match service.create(incomplete).await {
            Err(DomainError::Validation { message }) => {
                assert_eq!(message, SUBMISSION_FIELDS_REQUIRED)
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_teacher_reference() {
        let service = create_service();

        let result = service.create(input("t 1")).await;
        assert!(matches!(result, Err(DomainError::FieldErrors { .. })));
    }

    #[tokio::test]
    async fn test_approve_sets_status_and_visibility() {
        let service = create_service();
        let file = service.create(input("t-1")).await.unwrap();

        let approved = service.approve(file.id().as_str()).await.unwrap();
        assert_eq!(approved.status(), SubmissionStatus::Approved);
        assert!(approved.is_public());

        let stored = &service.list().await.unwrap()[0];
        assert_eq!(stored.status(), SubmissionStatus::Approved);
        assert!(stored.is_public());
    }

    #[tokio::test]
    async fn test_decline_messages() {
        let service = create_service();
        let first = service.create(input("t-1")).await.unwrap();
        let second = service.create(input("t-1")).await.unwrap();

        let declined = service.decline(first.id().as_str(), None).await.unwrap();
        assert_eq!(declined.status(), SubmissionStatus::Declined);
        assert_eq!(declined.message(), DEFAULT_DECLINE_MESSAGE);

        let declined = service
            .decline(second.id().as_str(), Some("Missing the appendix"))
            .await
            .unwrap();
        assert_eq!(declined.message(), "Missing the appendix");
    }

    #[tokio::test]
    async fn test_reviewed_submission_cannot_flip() {
        let service = create_service();
        let file = service.create(input("t-1")).await.unwrap();

        service.decline(file.id().as_str(), None).await.unwrap();

        let result = service.approve(file.id().as_str()).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_review_missing_submission() {
        let service = create_service();

        match service.approve("0123456789abcdef").await {
            Err(DomainError::NotFound { message }) => assert_eq!(message, "Submission not found."),
            other => panic!("Expected not found, got {:?}", other),
        }
        assert!(matches!(
            service.decline("bad id", None).await,
            Err(DomainError::InvalidId { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_for_teacher() {
        let service = create_service();
        service.create(input("t-1")).await.unwrap();
        service.create(input("t-2")).await.unwrap();

        let files = service.list_for_teacher("user-1").await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].teacher_id().as_str(), "t-1");

        let result = service.list_for_teacher("user-9").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let storage = Arc::new(MockStorage::<SubmittedFile>::new().with_error("disk full"));
        let service = SubmissionService::new(
            Arc::new(StorageSubmissionRepository::new(storage)),
            teachers(),
        );

        let result = service.create(input("t-1")).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
