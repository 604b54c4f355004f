//! Teacher directory service

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::TeacherSeed;
use crate::domain::teacher::{Teacher, TeacherId, TeacherRepository};
use crate::domain::DomainError;

/// Teacher records seeded from configuration
#[derive(Debug)]
pub struct TeacherDirectory<R: TeacherRepository> {
    repository: Arc<R>,
}

impl<R: TeacherRepository> TeacherDirectory<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Insert configured teachers whose user id is not known yet
    ///
    /// Returns the number of records created.
    pub async fn seed(&self, seeds: &[TeacherSeed]) -> Result<usize, DomainError> {
        let mut created = 0;

        for seed in seeds {
            if self.repository.find_by_user_id(&seed.user_id).await?.is_some() {
                debug!(user_id = %seed.user_id, "Teacher already present, skipping seed");
                continue;
            }

            let id = seed.id.as_deref().unwrap_or(&seed.user_id);
            let id = TeacherId::new(id).map_err(|e| {
                DomainError::configuration(format!("Invalid teacher id '{}': {}", id, e))
            })?;
            let teacher = Teacher::new(
                id,
                &seed.full_name,
                &seed.educational_mail,
                &seed.user_id,
            )
            .map_err(|e| DomainError::configuration(e.to_string()))?;

            info!(id = %teacher.id(), name = %teacher.full_name(), "Seeding teacher");
            self.repository.create(teacher).await?;
            created += 1;
        }

        Ok(created)
    }

    /// All teacher records
    pub async fn list(&self) -> Result<Vec<Teacher>, DomainError> {
        self.repository.list().await
    }
}
