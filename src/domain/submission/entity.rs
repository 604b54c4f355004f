//! Submitted file entity and review state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::storage::{generate_document_id, StorageEntity, StorageKey};
use crate::domain::teacher::TeacherId;

/// Feedback stored when a teacher declines without writing one
pub const DEFAULT_DECLINE_MESSAGE: &str = "Submission declined.";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("Submission ID cannot be empty")]
    EmptyId,

    #[error("Submission ID can only contain alphanumeric characters, hyphens and underscores")]
    InvalidIdCharacters,

    #[error("Submission has already been {current}; it cannot be {requested}.")]
    InvalidTransition {
        current: SubmissionStatus,
        requested: SubmissionStatus,
    },
}

/// Submission identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubmissionId(String);

impl SubmissionId {
    pub fn new(id: impl Into<String>) -> Result<Self, SubmissionError> {
        let id = id.into();

        if id.is_empty() {
            return Err(SubmissionError::EmptyId);
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(SubmissionError::InvalidIdCharacters);
        }

        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(generate_document_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SubmissionId {
    type Error = SubmissionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubmissionId> for String {
    fn from(id: SubmissionId) -> Self {
        id.0
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for SubmissionId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Review status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Waiting for the teacher's review
    #[default]
    Pending,
    Approved,
    Declined,
}

impl SubmissionStatus {
    /// Approved and declined are final; repeating the same decision is allowed
    pub fn can_transition_to(&self, next: SubmissionStatus) -> bool {
        match (self, next) {
            (Self::Pending, _) => true,
            (current, next) => *current == next,
        }
    }

    pub fn is_reviewed(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Declined => write!(f, "declined"),
        }
    }
}

/// Fields a team provides when submitting a project file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub downloadurl: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub intake: String,
    #[serde(default)]
    pub teacher_id: String,
}

impl NewSubmission {
    /// Schema-level check, one message per offending field
    pub fn field_errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = [
            ("projectName", &self.project_name),
            ("filename", &self.filename),
            ("downloadurl", &self.downloadurl),
            ("teamName", &self.team_name),
            ("intake", &self.intake),
            ("teacherId", &self.teacher_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| format!("Path `{}` is required.", field))
        .collect();

        if !self.teacher_id.trim().is_empty() && TeacherId::new(self.teacher_id.trim()).is_err() {
            errors.push(format!(
                "Path `teacherId` is not a valid teacher reference: '{}'",
                self.teacher_id
            ));
        }

        errors
    }
}

/// A project file submitted by a team for teacher review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedFile {
    #[serde(rename = "_id")]
    id: SubmissionId,
    project_name: String,
    filename: String,
    downloadurl: String,
    team_name: String,
    intake: String,
    teacher_id: TeacherId,
    submitted_at: DateTime<Utc>,
    status: SubmissionStatus,
    is_public: bool,
    message: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SubmittedFile {
    /// Build a pending, private submission
    ///
    /// Fails with the list of field messages when the input is incomplete.
    pub fn new(id: SubmissionId, input: NewSubmission) -> Result<Self, Vec<String>> {
        let errors = input.field_errors();

        if !errors.is_empty() {
            return Err(errors);
        }

        let teacher_id = TeacherId::new(input.teacher_id.trim()).map_err(|e| vec![e.to_string()])?;
        let now = Utc::now();

        Ok(Self {
            id,
            project_name: input.project_name.trim().to_string(),
            filename: input.filename.trim().to_string(),
            downloadurl: input.downloadurl.trim().to_string(),
            team_name: input.team_name.trim().to_string(),
            intake: input.intake.trim().to_string(),
            teacher_id,
            submitted_at: now,
            status: SubmissionStatus::Pending,
            is_public: false,
            message: String::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &SubmissionId {
        &self.id
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn downloadurl(&self) -> &str {
        &self.downloadurl
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn intake(&self) -> &str {
        &self.intake
    }

    pub fn teacher_id(&self) -> &TeacherId {
        &self.teacher_id
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Approve and publish the submission
    pub fn approve(&mut self) -> Result<(), SubmissionError> {
        self.transition(SubmissionStatus::Approved)?;
        self.is_public = true;
        Ok(())
    }

    /// Decline with feedback; blank feedback is replaced by the default text
    pub fn decline(&mut self, message: Option<&str>) -> Result<(), SubmissionError> {
        self.transition(SubmissionStatus::Declined)?;
        self.message = match message.map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => DEFAULT_DECLINE_MESSAGE.to_string(),
        };
        Ok(())
    }

    fn transition(&mut self, next: SubmissionStatus) -> Result<(), SubmissionError> {
        if !self.status.can_transition_to(next) {
            return Err(SubmissionError::InvalidTransition {
                current: self.status,
                requested: next,
            });
        }

        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl StorageEntity for SubmittedFile {
    type Key = SubmissionId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
