//! Teacher entity

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::storage::{StorageEntity, StorageKey};

const MAX_TEACHER_ID_LENGTH: usize = 64;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeacherValidationError {
    #[error("Teacher ID cannot be empty")]
    EmptyId,

    #[error("Teacher ID cannot exceed {0} characters")]
    IdTooLong(usize),

    #[error("Teacher ID can only contain alphanumeric characters, hyphens and underscores")]
    InvalidIdCharacters,

    #[error("Teacher {0} cannot be empty")]
    EmptyField(&'static str),
}

/// Teacher identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeacherId(String);

impl TeacherId {
    pub fn new(id: impl Into<String>) -> Result<Self, TeacherValidationError> {
        let id = id.into();

        if id.is_empty() {
            return Err(TeacherValidationError::EmptyId);
        }

        if id.len() > MAX_TEACHER_ID_LENGTH {
            return Err(TeacherValidationError::IdTooLong(MAX_TEACHER_ID_LENGTH));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(TeacherValidationError::InvalidIdCharacters);
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TeacherId {
    type Error = TeacherValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeacherId> for String {
    fn from(id: TeacherId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeacherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for TeacherId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A teacher who can supervise teams and review submissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(rename = "_id")]
    id: TeacherId,
    full_name: String,
    educational_mail: String,
    user_id: String,
}

impl Teacher {
    pub fn new(
        id: TeacherId,
        full_name: impl Into<String>,
        educational_mail: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Result<Self, TeacherValidationError> {
        let full_name = full_name.into().trim().to_string();
        let educational_mail = educational_mail.into().trim().to_string();
        let user_id = user_id.into().trim().to_string();

        for (field, value) in [
            ("fullName", &full_name),
            ("educationalMail", &educational_mail),
            ("userId", &user_id),
        ] {
            if value.is_empty() {
                return Err(TeacherValidationError::EmptyField(field));
            }
        }

        Ok(Self {
            id,
            full_name,
            educational_mail,
            user_id,
        })
    }

    pub fn id(&self) -> &TeacherId {
        &self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn educational_mail(&self) -> &str {
        &self.educational_mail
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl StorageEntity for Teacher {
    type Key = TeacherId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_id_validation() {
        assert!(TeacherId::new("t-1").is_ok());
        assert_eq!(TeacherId::new(""), Err(TeacherValidationError::EmptyId));
        assert_eq!(
            TeacherId::new("t 1"),
            Err(TeacherValidationError::InvalidIdCharacters)
        );
    }

    #[test]
    fn test_teacher_requires_fields() {
        let id = TeacherId::new("t-1").unwrap();

        assert_eq!(
            Teacher::new(id.clone(), " ", "a@cse.bubt.edu.bd", "u-1").unwrap_err(),
            TeacherValidationError::EmptyField("fullName")
        );
        assert_eq!(
            Teacher::new(id, "Dr. Rahman", "a@cse.bubt.edu.bd", "").unwrap_err(),
            TeacherValidationError::EmptyField("userId")
        );
    }

    #[test]
    fn test_teacher_serialized_shape() {
        let teacher = Teacher::new(
            TeacherId::new("t-1").unwrap(),
            "Dr. Rahman",
            "rahman@cse.bubt.edu.bd",
            "u-1",
        )
        .unwrap();

        let json = serde_json::to_value(&teacher).unwrap();
        assert_eq!(json["_id"], "t-1");
        assert_eq!(json["fullName"], "Dr. Rahman");
        assert_eq!(json["userId"], "u-1");
    }
}
