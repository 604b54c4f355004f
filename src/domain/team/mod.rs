//! Team domain module
//!
//! A team is a group of up to five students working on one capstone project.
//! Students are embedded as [`Member`] records; a student can belong to at
//! most one team.

mod entity;
mod repository;
mod validation;

pub use entity::{Member, MemberField, MemberPatch, Team, TeamId};
pub use repository::TeamRepository;
pub use validation::{
    ensure_distinct_mails, mail_department, merge_members, normalize_mail, validate_member,
    validate_member_count, validate_new_members, validate_team_id, validate_team_name,
    TeamValidationError, MAX_TEAM_MEMBERS,
};
