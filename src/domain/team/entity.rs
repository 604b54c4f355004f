//! Team entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    normalize_mail, validate_member_count, validate_team_id, validate_team_name,
    TeamValidationError,
};
use crate::domain::storage::{generate_document_id, StorageEntity, StorageKey};
use crate::domain::teacher::{Teacher, TeacherId};

/// Team identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(String);

impl TeamId {
    /// Create a new TeamId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, TeamValidationError> {
        let id = id.into();
        validate_team_id(&id)?;
        Ok(Self(id))
    }

    /// Allocate a fresh identifier for a new team
    pub fn generate() -> Self {
        Self(generate_document_id())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for TeamId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// The required profile fields of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberField {
    Username,
    Intake,
    Section,
    Department,
    EducationalMail,
    Phone,
}

impl MemberField {
    pub const ALL: [MemberField; 6] = [
        Self::Username,
        Self::Intake,
        Self::Section,
        Self::Department,
        Self::EducationalMail,
        Self::Phone,
    ];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Intake => "intake",
            Self::Section => "section",
            Self::Department => "department",
            Self::EducationalMail => "educationalMail",
            Self::Phone => "phone",
        }
    }
}

impl std::fmt::Display for MemberField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A student's profile embedded in a team
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub intake: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub educational_mail: String,
    #[serde(default)]
    pub phone: String,
}

impl Member {
    pub fn get(&self, field: MemberField) -> &str {
        match field {
            MemberField::Username => &self.username,
            MemberField::Intake => &self.intake,
            MemberField::Section => &self.section,
            MemberField::Department => &self.department,
            MemberField::EducationalMail => &self.educational_mail,
            MemberField::Phone => &self.phone,
        }
    }

    /// Check the member's mail against an address, ignoring case and padding
    pub fn has_mail(&self, mail: &str) -> bool {
        normalize_mail(&self.educational_mail) == normalize_mail(mail)
    }
}

/// Partial member data sent with a team update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPatch {
    pub username: Option<String>,
    pub intake: Option<String>,
    pub section: Option<String>,
    pub department: Option<String>,
    pub educational_mail: Option<String>,
    pub phone: Option<String>,
}

impl MemberPatch {
    pub fn get(&self, field: MemberField) -> Option<&str> {
        match field {
            MemberField::Username => self.username.as_deref(),
            MemberField::Intake => self.intake.as_deref(),
            MemberField::Section => self.section.as_deref(),
            MemberField::Department => self.department.as_deref(),
            MemberField::EducationalMail => self.educational_mail.as_deref(),
            MemberField::Phone => self.phone.as_deref(),
        }
    }

    /// The first field that was supplied but is blank
    pub fn first_blank_field(&self) -> Option<MemberField> {
        MemberField::ALL
            .iter()
            .copied()
            .find(|field| self.get(*field).is_some_and(|v| v.trim().is_empty()))
    }

    /// Overlay the supplied fields onto `base`
    pub fn apply_to(&self, base: &Member) -> Member {
        let pick = |patched: &Option<String>, current: &str| {
            patched.clone().unwrap_or_else(|| current.to_string())
        };

        Member {
            username: pick(&self.username, &base.username),
            intake: pick(&self.intake, &base.intake),
            section: pick(&self.section, &base.section),
            department: pick(&self.department, &base.department),
            educational_mail: pick(&self.educational_mail, &base.educational_mail),
            phone: pick(&self.phone, &base.phone),
        }
    }
}

impl From<Member> for MemberPatch {
    fn from(member: Member) -> Self {
        Self {
            username: Some(member.username),
            intake: Some(member.intake),
            section: Some(member.section),
            department: Some(member.department),
            educational_mail: Some(member.educational_mail),
            phone: Some(member.phone),
        }
    }
}

/// Team entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Unique identifier
    #[serde(rename = "_id")]
    id: TeamId,
    /// Globally unique display name
    team_name: String,
    /// Ordered roster, at most five students
    members: Vec<Member>,
    /// Display name of the assigned teacher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigned_teacher: Option<String>,
    /// Reference to the assigned teacher's record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    teacher_id: Option<TeacherId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team; member contents are validated by the caller
    pub fn new(
        id: TeamId,
        team_name: impl Into<String>,
        members: Vec<Member>,
    ) -> Result<Self, TeamValidationError> {
        let team_name = team_name.into();
        validate_team_name(&team_name)?;
        validate_member_count(members.len())?;
        let now = Utc::now();

        Ok(Self {
            id,
            team_name: team_name.trim().to_string(),
            members,
            assigned_teacher: None,
            teacher_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    // Getters

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn assigned_teacher(&self) -> Option<&str> {
        self.assigned_teacher.as_deref()
    }

    pub fn teacher_id(&self) -> Option<&TeacherId> {
        self.teacher_id.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn member_mails(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.educational_mail.as_str())
    }

    pub fn has_member_mail(&self, mail: &str) -> bool {
        self.members.iter().any(|m| m.has_mail(mail))
    }

    /// Whether `teacher` supervises the team, matched on the teacher's full name
    pub fn is_supervised_by(&self, teacher: &Teacher) -> bool {
        self.assigned_teacher.as_deref() == Some(teacher.full_name())
    }

    /// Whether `name` is already the assigned teacher; the stored
    /// `teacher_id` does not take part in the comparison
    pub fn is_assigned_to(&self, name: &str) -> bool {
        self.assigned_teacher.as_deref() == Some(name)
    }

    // Mutators

    /// Update the name
    pub fn set_team_name(&mut self, name: impl Into<String>) -> Result<(), TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        self.team_name = name.trim().to_string();
        self.touch();
        Ok(())
    }

    /// Replace the roster
    pub fn set_members(&mut self, members: Vec<Member>) -> Result<(), TeamValidationError> {
        validate_member_count(members.len())?;
        self.members = members;
        self.touch();
        Ok(())
    }

    /// Assign (or reassign) the supervising teacher
    pub fn assign_teacher(&mut self, name: impl Into<String>, teacher_id: Option<TeacherId>) {
        self.assigned_teacher = Some(name.into());
        self.teacher_id = teacher_id;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Team {
    type Key = TeamId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(mail: &str) -> Member {
        Member {
            username: "alice".to_string(),
            intake: "49".to_string(),
            section: "2".to_string(),
            department: "CSE".to_string(),
            educational_mail: mail.to_string(),
            phone: "01711111111".to_string(),
        }
    }

    fn teacher(id: &str, name: &str) -> Teacher {
        Teacher::new(
            TeacherId::new(id).unwrap(),
            name,
            "t@cse.bubt.edu.bd",
            "user-1",
        )
        .unwrap()
    }

    #[test]
    fn test_team_id_valid() {
        let id = TeamId::new("my-team").unwrap();
        assert_eq!(id.as_str(), "my-team");
        assert!(TeamId::new("").is_err());
        assert!(TeamId::new("bad id").is_err());
    }

    #[test]
    fn test_generated_team_id_is_valid() {
        let id = TeamId::generate();
        assert!(TeamId::new(id.as_str()).is_ok());
    }

    #[test]
    fn test_team_creation_trims_name() {
        let team = Team::new(TeamId::generate(), "  Alpha  ", vec![member("a@cse.bubt.edu.bd")])
            .unwrap();

        assert_eq!(team.team_name(), "Alpha");
        assert_eq!(team.members().len(), 1);
        assert!(team.assigned_teacher().is_none());
        assert!(team.teacher_id().is_none());
    }

    #[test]
    fn test_team_rejects_six_members() {
        let members = (0..6)
            .map(|i| member(&format!("s{}@cse.bubt.edu.bd", i)))
            .collect();

        assert_eq!(
            Team::new(TeamId::generate(), "Alpha", members).unwrap_err(),
            TeamValidationError::TooManyMembers(5)
        );
    }

    #[test]
    fn test_has_member_mail_ignores_case() {
        let team = Team::new(TeamId::generate(), "Alpha", vec![member("a@cse.bubt.edu.bd")])
            .unwrap();

        assert!(team.has_member_mail("A@CSE.bubt.edu.bd"));
        assert!(!team.has_member_mail("b@cse.bubt.edu.bd"));
    }

    #[test]
    fn test_supervision_matches_full_name() {
        let rahman = teacher("t-1", "Dr. Rahman");
        let karim = teacher("t-2", "Dr. Karim");

        let mut team = Team::new(TeamId::generate(), "Alpha", vec![]).unwrap();
        assert!(!team.is_supervised_by(&rahman));

        team.assign_teacher("Dr. Rahman", Some(karim.id().clone()));
        assert!(team.is_supervised_by(&rahman));
        assert!(!team.is_supervised_by(&karim));

        team.assign_teacher("Dr. Rahman", None);
        assert!(team.is_supervised_by(&rahman));
    }

    #[test]
    fn test_is_assigned_to_compares_names_only() {
        let mut team = Team::new(TeamId::generate(), "Alpha", vec![]).unwrap();
        assert!(!team.is_assigned_to("Dr. Rahman"));

        team.assign_teacher("Dr. Rahman", Some(TeacherId::new("t-1").unwrap()));

        assert!(team.is_assigned_to("Dr. Rahman"));
        assert!(!team.is_assigned_to("Dr. Karim"));
        assert_eq!(team.teacher_id().map(|id| id.as_str()), Some("t-1"));
    }

    #[test]
    fn test_set_team_name_updates_timestamp() {
        let mut team = Team::new(TeamId::generate(), "Alpha", vec![]).unwrap();
        let original_updated = team.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));

        team.set_team_name("Beta").unwrap();
        assert_eq!(team.team_name(), "Beta");
        assert!(team.updated_at() > original_updated);
        assert!(team.set_team_name("").is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let team = Team::new(
            TeamId::new("abc123").unwrap(),
            "Alpha",
            vec![member("a@cse.bubt.edu.bd")],
        )
        .unwrap();

        let json = serde_json::to_value(&team).unwrap();

        assert_eq!(json["_id"], "abc123");
        assert_eq!(json["teamName"], "Alpha");
        assert_eq!(json["members"][0]["educationalMail"], "a@cse.bubt.edu.bd");
        assert!(json.get("assignedTeacher").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
