//! Team validation rules
//!
//! Pure checks applied to team payloads before anything touches the store.
//! Member indexes in error messages are 1-based, matching how a team form
//! presents its rows.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::entity::{Member, MemberField, MemberPatch};

/// `<localpart>@<department>.bubt.edu.bd`
static DEPARTMENT_MAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.+@([a-z]+)\.bubt\.edu\.bd$").unwrap());

/// Upper bound on team size
pub const MAX_TEAM_MEMBERS: usize = 5;

const MAX_TEAM_ID_LENGTH: usize = 64;
const MAX_TEAM_NAME_LENGTH: usize = 100;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team ID cannot be empty")]
    EmptyId,

    #[error("Team ID cannot exceed {0} characters")]
    IdTooLong(usize),

    #[error("Team ID can only contain alphanumeric characters, hyphens and underscores")]
    InvalidIdCharacters,

    #[error("Team name is required and must be a non-empty string.")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("A team cannot have more than {0} members.")]
    TooManyMembers(usize),

    #[error("Each member must have a unique educationalMail within the team.")]
    DuplicateMemberEmail,

    #[error("Member {index} is missing or has invalid fields: {}", join_fields(.fields))]
    MissingFields {
        index: usize,
        fields: Vec<MemberField>,
    },

    #[error("Member {index}: field \"{field}\" must be a non-empty string if provided.")]
    EmptyField { index: usize, field: MemberField },

    #[error(
        "Member {index}: department \"{department}\" does not match educationalMail domain \"{domain}\""
    )]
    DepartmentMismatch {
        index: usize,
        department: String,
        domain: String,
    },
}

impl TeamValidationError {
    /// The 1-based member position the error refers to, if any
    pub fn member_index(&self) -> Option<usize> {
        match self {
            Self::MissingFields { index, .. }
            | Self::EmptyField { index, .. }
            | Self::DepartmentMismatch { index, .. } => Some(*index),
            _ => None,
        }
    }
}

fn join_fields(fields: &[MemberField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate a team ID
pub fn validate_team_id(id: &str) -> Result<(), TeamValidationError> {
    if id.is_empty() {
        return Err(TeamValidationError::EmptyId);
    }

    if id.len() > MAX_TEAM_ID_LENGTH {
        return Err(TeamValidationError::IdTooLong(MAX_TEAM_ID_LENGTH));
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TeamValidationError::InvalidIdCharacters);
    }

    Ok(())
}

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

/// Reject teams larger than [`MAX_TEAM_MEMBERS`]
pub fn validate_member_count(count: usize) -> Result<(), TeamValidationError> {
    if count > MAX_TEAM_MEMBERS {
        return Err(TeamValidationError::TooManyMembers(MAX_TEAM_MEMBERS));
    }

    Ok(())
}

/// Normalized form used for every email comparison
pub fn normalize_mail(mail: &str) -> String {
    mail.trim().to_lowercase()
}

/// Extract the department subdomain from an institutional address
///
/// Returns `None` when the address is not of the form
/// `localpart@<subdomain>.bubt.edu.bd`.
pub fn mail_department(mail: &str) -> Option<String> {
    let mail = normalize_mail(mail);

    DEPARTMENT_MAIL_PATTERN
        .captures(&mail)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Validate one complete member at the given 0-based position
pub fn validate_member(position: usize, member: &Member) -> Result<(), TeamValidationError> {
    let index = position + 1;

    let missing: Vec<MemberField> = MemberField::ALL
        .iter()
        .copied()
        .filter(|field| member.get(*field).trim().is_empty())
        .collect();

    if !missing.is_empty() {
        return Err(TeamValidationError::MissingFields {
            index,
            fields: missing,
        });
    }

    let department = member.department.trim().to_lowercase();

    if let Some(domain) = mail_department(&member.educational_mail) {
        if domain != department {
            return Err(TeamValidationError::DepartmentMismatch {
                index,
                department,
                domain,
            });
        }
    }

    Ok(())
}

/// Fail when two addresses normalize to the same mailbox
pub fn ensure_distinct_mails<'a>(
    mails: impl IntoIterator<Item = &'a str>,
) -> Result<(), TeamValidationError> {
    let mut seen = HashSet::new();

    for mail in mails {
        if !seen.insert(normalize_mail(mail)) {
            return Err(TeamValidationError::DuplicateMemberEmail);
        }
    }

    Ok(())
}

/// Validate the member list of a team being created
pub fn validate_new_members(members: &[Member]) -> Result<(), TeamValidationError> {
    validate_member_count(members.len())?;
    ensure_distinct_mails(members.iter().map(|m| m.educational_mail.as_str()))?;

    for (position, member) in members.iter().enumerate() {
        validate_member(position, member)?;
    }

    Ok(())
}

/// Merge member patches onto an existing roster
///
/// Patch `i` is applied to the member at position `i`, or appended as a new
/// member when the position is past the end of the roster. Fields a patch
/// leaves out keep their current value.
pub fn merge_members(
    existing: &[Member],
    patches: &[MemberPatch],
) -> Result<Vec<Member>, TeamValidationError> {
    ensure_distinct_mails(
        patches
            .iter()
            .filter_map(|p| p.educational_mail.as_deref())
            .filter(|mail| !mail.trim().is_empty()),
    )?;

    let mut merged = existing.to_vec();

    for (position, patch) in patches.iter().enumerate() {
        if let Some(field) = patch.first_blank_field() {
            return Err(TeamValidationError::EmptyField {
                index: position + 1,
                field,
            });
        }

        if position < merged.len() {
            let member = patch.apply_to(&merged[position]);
            validate_member(position, &member)?;
            merged[position] = member;
        } else {
            let member = patch.apply_to(&Member::default());
            validate_member(merged.len(), &member)?;
            merged.push(member);
        }
    }

    validate_member_count(merged.len())?;
    ensure_distinct_mails(merged.iter().map(|m| m.educational_mail.as_str()))?;

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, dept: &str, mail: &str) -> Member {
        Member {
            username: name.to_string(),
            intake: "49".to_string(),
            section: "1".to_string(),
            department: dept.to_string(),
            educational_mail: mail.to_string(),
            phone: "01700000000".to_string(),
        }
    }

    fn roster(count: usize) -> Vec<Member> {
        (0..count)
            .map(|i| member(&format!("s{}", i), "CSE", &format!("s{}@cse.bubt.edu.bd", i)))
            .collect()
    }

    #[test]
    fn test_valid_team_id() {
        assert!(validate_team_id("3f2a9c").is_ok());
        assert!(validate_team_id("team_1-a").is_ok());
        assert_eq!(validate_team_id(""), Err(TeamValidationError::EmptyId));
        assert_eq!(
            validate_team_id("a/b"),
            Err(TeamValidationError::InvalidIdCharacters)
        );
        assert_eq!(
            validate_team_id(&"a".repeat(65)),
            Err(TeamValidationError::IdTooLong(64))
        );
    }

    #[test]
    fn test_team_name_rules() {
        assert!(validate_team_name("Byte Busters").is_ok());
        assert_eq!(validate_team_name("   "), Err(TeamValidationError::EmptyName));
        assert_eq!(
            validate_team_name(&"x".repeat(101)),
            Err(TeamValidationError::NameTooLong(100))
        );
    }

    #[test]
    fn test_member_count_limit() {
        assert!(validate_new_members(&roster(0)).is_ok());
        assert!(validate_new_members(&roster(5)).is_ok());
        assert_eq!(
            validate_new_members(&roster(6)),
            Err(TeamValidationError::TooManyMembers(5))
        );
    }

    #[test]
    fn test_mail_department_extraction() {
        assert_eq!(mail_department("alice@cse.bubt.edu.bd"), Some("cse".to_string()));
        assert_eq!(mail_department(" Bob@EEE.bubt.edu.bd "), Some("eee".to_string()));
        assert_eq!(mail_department("alice@gmail.com"), None);
        assert_eq!(mail_department("alice@cse2.bubt.edu.bd"), None);
        assert_eq!(mail_department("@cse.bubt.edu.bd"), None);
    }

    #[test]
    fn test_department_matches_mail_case_insensitively() {
        assert!(validate_member(0, &member("alice", "CSE", "alice@cse.bubt.edu.bd")).is_ok());

        let err = validate_member(0, &member("alice", "EEE", "alice@cse.bubt.edu.bd")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Member 1: department \"eee\" does not match educationalMail domain \"cse\""
        );
        assert_eq!(err.member_index(), Some(1));
    }

    #[test]
    fn test_non_institutional_mail_skips_domain_check() {
        assert!(validate_member(0, &member("alice", "EEE", "alice@gmail.com")).is_ok());
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let mut incomplete = member("alice", "CSE", "alice@cse.bubt.edu.bd");
        incomplete.intake = String::new();
        incomplete.phone = "  ".to_string();

        let err = validate_member(2, &incomplete).unwrap_err();
        assert_eq!(
            err,
            TeamValidationError::MissingFields {
                index: 3,
                fields: vec![MemberField::Intake, MemberField::Phone],
            }
        );
        assert_eq!(
            err.to_string(),
            "Member 3 is missing or has invalid fields: intake, phone"
        );
    }

    #[test]
    fn test_duplicate_mails_within_payload() {
        let members = vec![
            member("a", "CSE", "same@cse.bubt.edu.bd"),
            member("b", "CSE", "SAME@cse.bubt.edu.bd"),
        ];

        assert_eq!(
            validate_new_members(&members),
            Err(TeamValidationError::DuplicateMemberEmail)
        );
    }

    #[test]
    fn test_merge_positional_preserves_other_fields() {
        let existing = roster(2);
        let patch = MemberPatch {
            phone: Some("01999999999".to_string()),
            ..Default::default()
        };

        let merged = merge_members(&existing, &[patch]).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].phone, "01999999999");
        assert_eq!(merged[0].username, existing[0].username);
        assert_eq!(merged[0].educational_mail, existing[0].educational_mail);
        assert_eq!(merged[1], existing[1]);
    }

    #[test]
    fn test_merge_is_positional_even_for_known_mail() {
        let existing = roster(2);
        let patch = MemberPatch {
            educational_mail: Some("s1@cse.bubt.edu.bd".to_string()),
            phone: Some("0999".to_string()),
            ..Default::default()
        };

        assert_eq!(
            merge_members(&existing, &[patch]),
            Err(TeamValidationError::DuplicateMemberEmail)
        );

        let patch = MemberPatch {
            educational_mail: Some("s9@cse.bubt.edu.bd".to_string()),
            phone: Some("0999".to_string()),
            ..Default::default()
        };
        let merged = merge_members(&existing, &[patch]).unwrap();

        assert_eq!(merged[0].educational_mail, "s9@cse.bubt.edu.bd");
        assert_eq!(merged[0].phone, "0999");
        assert_eq!(merged[0].username, "s0");
        assert_eq!(merged[1], existing[1]);
    }

    #[test]
    fn test_merge_reports_patch_position() {
        let patches = vec![
            MemberPatch::default(),
            MemberPatch {
                department: Some("EEE".to_string()),
                ..Default::default()
            },
        ];

        let err = merge_members(&roster(3), &patches).unwrap_err();
        assert!(matches!(err, TeamValidationError::DepartmentMismatch { index: 2, .. }));
    }

    #[test]
    fn test_merge_appends_complete_new_member() {
        let existing = roster(1);
        let new_member = member("new", "CSE", "new@cse.bubt.edu.bd");
        let patches = vec![MemberPatch::default(), MemberPatch::from(new_member.clone())];

        let merged = merge_members(&existing, &patches).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1], new_member);
    }

    #[test]
    fn test_merge_rejects_incomplete_new_member() {
        let existing = roster(1);
        let patches = vec![
            MemberPatch::default(),
            MemberPatch {
                username: Some("half".to_string()),
                ..Default::default()
            },
        ];

        let err = merge_members(&existing, &patches).unwrap_err();
        assert_eq!(err.member_index(), Some(2));
    }

    #[test]
    fn test_merge_rejects_blank_supplied_field() {
        let patch = MemberPatch {
            section: Some(" ".to_string()),
            ..Default::default()
        };

        assert_eq!(
            merge_members(&roster(1), &[patch]),
            Err(TeamValidationError::EmptyField {
                index: 1,
                field: MemberField::Section,
            })
        );
    }

    #[test]
    fn test_merge_rechecks_department_against_merged_mail() {
        let patch = MemberPatch {
            department: Some("EEE".to_string()),
            ..Default::default()
        };

        let err = merge_members(&roster(1), &[patch]).unwrap_err();
        assert!(matches!(err, TeamValidationError::DepartmentMismatch { index: 1, .. }));
    }

    #[test]
    fn test_merge_rejects_growing_past_limit() {
        let extra = MemberPatch::from(member("x", "CSE", "x@cse.bubt.edu.bd"));
        let mut patches = vec![MemberPatch::default(); 5];
        patches.push(extra);

        assert_eq!(
            merge_members(&roster(5), &patches),
            Err(TeamValidationError::TooManyMembers(5))
        );
    }

    #[test]
    fn test_merge_rejects_duplicate_mails_in_payload() {
        let patches = vec![
            MemberPatch {
                educational_mail: Some("dup@cse.bubt.edu.bd".to_string()),
                ..Default::default()
            },
            MemberPatch {
                educational_mail: Some("dup@cse.bubt.edu.bd".to_string()),
                ..Default::default()
            },
        ];

        assert_eq!(
            merge_members(&roster(2), &patches),
            Err(TeamValidationError::DuplicateMemberEmail)
        );
    }
}
