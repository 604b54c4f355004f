//! Capstone Hub API
//!
//! Backend for university capstone projects:
//! - Student teams with validated member rosters
//! - Teacher assignment and teacher-scoped listings
//! - Project file submissions with an approve/decline review

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{
    submission::SubmittedFile,
    teacher::{Teacher, TeacherRepository},
    team::Team,
};
use infrastructure::{
    auth::{JwtConfig, JwtService},
    storage::{collections, StorageConfig, StorageFactory},
    submission::{StorageSubmissionRepository, SubmissionService},
    teacher::{StorageTeacherRepository, TeacherDirectory},
    team::{StorageTeamRepository, TeamService},
};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = StorageConfig::from_settings(&config.storage)?;
    let factory = StorageFactory::connect(&storage_config).await?;

    info!("Storage backend: {:?}", factory.storage_type());

    let teacher_storage = factory.collection::<Teacher>(collections::TEACHERS).await?;
    let team_storage = factory.collection::<Team>(collections::TEAMS).await?;
    let submission_storage = factory
        .collection::<SubmittedFile>(collections::SUBMISSIONS)
        .await?;

    let teacher_repository = Arc::new(StorageTeacherRepository::new(teacher_storage));
    let teachers: Arc<dyn TeacherRepository> = teacher_repository.clone();

    let teacher_directory = TeacherDirectory::new(teacher_repository);
    let seeded = teacher_directory.seed(&config.teachers).await?;
    info!(seeded, configured = config.teachers.len(), "Teacher directory ready");

    let team_service = TeamService::new(
        Arc::new(StorageTeamRepository::new(team_storage)),
        teachers.clone(),
    );
    let submission_service = SubmissionService::new(
        Arc::new(StorageSubmissionRepository::new(submission_storage)),
        teachers,
    );

    let jwt_service = JwtService::new(JwtConfig::from_auth_config(&config.auth));

    Ok(AppState::new(
        Arc::new(team_service),
        Arc::new(submission_service),
        Arc::new(teacher_directory),
        Arc::new(jwt_service),
    ))
}
