//! Application state for shared services

use std::sync::Arc;

use crate::domain::submission::{NewSubmission, SubmissionRepository, SubmittedFile};
use crate::domain::teacher::{Teacher, TeacherRepository};
use crate::domain::team::{Team, TeamRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::submission::SubmissionService;
use crate::infrastructure::teacher::TeacherDirectory;
use crate::infrastructure::team::{
    AssignTeacherRequest, CreateTeamRequest, TeamService, UpdateTeamRequest,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub team_service: Arc<dyn TeamServiceTrait>,
    pub submission_service: Arc<dyn SubmissionServiceTrait>,
    pub teacher_directory: Arc<dyn TeacherDirectoryTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
}

/// Trait for team service operations
#[async_trait::async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError>;
    async fn list(&self) -> Result<Vec<Team>, DomainError>;
    async fn get(&self, id: &str) -> Result<Team, DomainError>;
    async fn list_for_teacher(&self, principal_mail: &str) -> Result<Vec<Team>, DomainError>;
    async fn list_for_member(&self, mail: &str) -> Result<Vec<Team>, DomainError>;
    async fn update(&self, id: &str, request: UpdateTeamRequest) -> Result<Team, DomainError>;
    async fn rename(&self, id: &str, team_name: &str) -> Result<Team, DomainError>;
    async fn assign_teacher(&self, request: AssignTeacherRequest) -> Result<Team, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

/// Trait for submission service operations
#[async_trait::async_trait]
pub trait SubmissionServiceTrait: Send + Sync {
    async fn create(&self, input: NewSubmission) -> Result<SubmittedFile, DomainError>;
    async fn list(&self) -> Result<Vec<SubmittedFile>, DomainError>;
    async fn list_for_teacher(&self, user_id: &str) -> Result<Vec<SubmittedFile>, DomainError>;
    async fn approve(&self, id: &str) -> Result<SubmittedFile, DomainError>;
    async fn decline(&self, id: &str, message: Option<&str>)
        -> Result<SubmittedFile, DomainError>;
}

/// Trait for the teacher directory
#[async_trait::async_trait]
pub trait TeacherDirectoryTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Teacher>, DomainError>;
}

#[async_trait::async_trait]
impl<R: TeamRepository + 'static> TeamServiceTrait for TeamService<R> {
    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        TeamService::create(self, request).await
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        TeamService::list(self).await
    }

    async fn get(&self, id: &str) -> Result<Team, DomainError> {
        TeamService::get(self, id).await
    }

    async fn list_for_teacher(&self, principal_mail: &str) -> Result<Vec<Team>, DomainError> {
        TeamService::list_for_teacher(self, principal_mail).await
    }

    async fn list_for_member(&self, mail: &str) -> Result<Vec<Team>, DomainError> {
        TeamService::list_for_member(self, mail).await
    }

    async fn update(&self, id: &str, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        TeamService::update(self, id, request).await
    }

    async fn rename(&self, id: &str, team_name: &str) -> Result<Team, DomainError> {
        TeamService::rename(self, id, team_name).await
    }

    async fn assign_teacher(&self, request: AssignTeacherRequest) -> Result<Team, DomainError> {
        TeamService::assign_teacher(self, request).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        TeamService::delete(self, id).await
    }
}

#[async_trait::async_trait]
impl<R: SubmissionRepository + 'static> SubmissionServiceTrait for SubmissionService<R> {
    async fn create(&self, input: NewSubmission) -> Result<SubmittedFile, DomainError> {
        SubmissionService::create(self, input).await
    }

    async fn list(&self) -> Result<Vec<SubmittedFile>, DomainError> {
        SubmissionService::list(self).await
    }

    async fn list_for_teacher(&self, user_id: &str) -> Result<Vec<SubmittedFile>, DomainError> {
        SubmissionService::list_for_teacher(self, user_id).await
    }

    async fn approve(&self, id: &str) -> Result<SubmittedFile, DomainError> {
        SubmissionService::approve(self, id).await
    }

    async fn decline(
        &self,
        id: &str,
        message: Option<&str>,
    ) -> Result<SubmittedFile, DomainError> {
        SubmissionService::decline(self, id, message).await
    }
}

#[async_trait::async_trait]
impl<R: TeacherRepository + 'static> TeacherDirectoryTrait for TeacherDirectory<R> {
    async fn list(&self) -> Result<Vec<Teacher>, DomainError> {
        TeacherDirectory::list(self).await
    }
}

impl AppState {
    pub fn new(
        team_service: Arc<dyn TeamServiceTrait>,
        submission_service: Arc<dyn SubmissionServiceTrait>,
        teacher_directory: Arc<dyn TeacherDirectoryTrait>,
        jwt_service: Arc<dyn JwtGenerator>,
    ) -> Self {
        Self {
            team_service,
            submission_service,
            teacher_directory,
            jwt_service,
        }
    }
}
