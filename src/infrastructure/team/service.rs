//! Team service for team management

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::teacher::{TeacherId, TeacherRepository};
use crate::domain::team::{
    merge_members, validate_new_members, validate_team_name, Member, MemberPatch,
    Team, TeamId, TeamRepository, TeamValidationError,
};
use crate::domain::DomainError;

pub const TEAM_NAME_TAKEN: &str = "A team with this name already exists.";
pub const TEACHER_ALREADY_ASSIGNED: &str = "This teacher has already been assigned to this team.";

/// Request for creating a new team
#[derive(Debug, Clone, Default)]
pub struct CreateTeamRequest {
    pub team_name: Option<String>,
    /// `None` when the payload carried no member array
    pub members: Option<Vec<Member>>,
}

/// Request for updating a team; member entries are merged onto the roster
#[derive(Debug, Clone, Default)]
pub struct UpdateTeamRequest {
    pub team_name: Option<String>,
    pub members: Option<Vec<MemberPatch>>,
}

/// Request for assigning a supervising teacher
#[derive(Debug, Clone, Default)]
pub struct AssignTeacherRequest {
    pub team_id: String,
    pub teacher_name: String,
    pub teacher_id: Option<String>,
}

/// Team service for managing teams
#[derive(Debug)]
pub struct TeamService<R: TeamRepository> {
    repository: Arc<R>,
    teachers: Arc<dyn TeacherRepository>,
}

impl<R: TeamRepository> TeamService<R> {
    pub fn new(repository: Arc<R>, teachers: Arc<dyn TeacherRepository>) -> Self {
        Self {
            repository,
            teachers,
        }
    }

    /// Create a new team after validating it against every existing team
    pub async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        let team_name = request.team_name.unwrap_or_default();
        info!(name = %team_name, "Creating team");

        validate_team_name(&team_name).map_err(reject)?;

        let members = request
            .members
            .ok_or_else(|| DomainError::validation("Members must be an array."))?;
        validate_new_members(&members).map_err(reject)?;

        self.ensure_name_available(&team_name, None).await?;

        let mails: Vec<String> = members
            .iter()
            .map(|m| m.educational_mail.clone())
            .collect();
        self.ensure_mails_available(&mails, None).await?;

        let team = Team::new(TeamId::generate(), team_name, members).map_err(reject)?;

        self.repository.create(team).await
    }

    /// List all teams, oldest first
    pub async fn list(&self) -> Result<Vec<Team>, DomainError> {
        debug!("Listing teams");
        self.repository.list().await
    }

    /// Get a team by ID
    pub async fn get(&self, id: &str) -> Result<Team, DomainError> {
        debug!(id = %id, "Fetching team");
        let team_id = parse_team_id(id)?;

        self.repository
            .get(&team_id)
            .await?
            .ok_or_else(team_not_found)
    }

    /// Teams supervised by the teacher owning `principal_mail`
    pub async fn list_for_teacher(&self, principal_mail: &str) -> Result<Vec<Team>, DomainError> {
        debug!(mail = %principal_mail, "Listing teams for teacher");

        let teacher = self
            .teachers
            .find_by_mail(principal_mail)
            .await?
            .ok_or_else(|| DomainError::not_found("Teacher not found"))?;

        self.repository.find_by_teacher(&teacher).await
    }

    /// Teams that have a member with the given educational mail
    pub async fn list_for_member(&self, mail: &str) -> Result<Vec<Team>, DomainError> {
        debug!(mail = %mail, "Listing teams for member");

        let teams: Vec<Team> = self
            .repository
            .list()
            .await?
            .into_iter()
            .filter(|team| team.has_member_mail(mail))
            .collect();

        if teams.is_empty() {
            return Err(DomainError::not_found("No Teams found for this email"));
        }

        Ok(teams)
    }

    /// Update name and/or members
    pub async fn update(&self, id: &str, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        info!(id = %id, "Updating team");

        let mut team = self.get(id).await?;

        if let Some(name) = request.team_name {
            validate_team_name(&name).map_err(reject)?;

            if name.trim() != team.team_name() {
                self.ensure_name_available(&name, Some(team.id())).await?;
            }

            team.set_team_name(name).map_err(reject)?;
        }

        if let Some(patches) = request.members {
            let merged = merge_members(team.members(), &patches).map_err(reject)?;

            let mails: Vec<String> = merged.iter().map(|m| m.educational_mail.clone()).collect();
            self.ensure_mails_available(&mails, Some(team.id())).await?;

            team.set_members(merged).map_err(reject)?;
        }

        self.repository.update(team).await
    }

    /// Rename a team
    pub async fn rename(&self, id: &str, team_name: &str) -> Result<Team, DomainError> {
        info!(id = %id, name = %team_name, "Renaming team");

        validate_team_name(team_name).map_err(reject)?;
        let mut team = self.get(id).await?;

        if team_name.trim() != team.team_name() {
            self.ensure_name_available(team_name, Some(team.id())).await?;
        }

        team.set_team_name(team_name).map_err(reject)?;
        self.repository.update(team).await
    }

    /// Assign or reassign the supervising teacher
    pub async fn assign_teacher(&self, request: AssignTeacherRequest) -> Result<Team, DomainError> {
        info!(
            team_id = %request.team_id,
            teacher = %request.teacher_name,
            "Assigning teacher"
        );

        let teacher_name = request.teacher_name.trim();

        if teacher_name.is_empty() || request.team_id.trim().is_empty() {
            return Err(DomainError::validation(
                "teamId and teacherName are required.",
            ));
        }

        let teacher_id = request
            .teacher_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(TeacherId::new)
            .transpose()
            .map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut team = self.get(&request.team_id).await?;

        if team.is_assigned_to(teacher_name) {
            warn!(team_id = %team.id(), "Teacher already assigned");
            return Err(DomainError::validation(TEACHER_ALREADY_ASSIGNED));
        }

        team.assign_teacher(teacher_name, teacher_id);
        self.repository.update(team).await
    }

    /// Delete a team
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        info!(id = %id, "Deleting team");
        let team_id = parse_team_id(id)?;

        if !self.repository.delete(&team_id).await? {
            return Err(team_not_found());
        }

        Ok(())
    }

    async fn ensure_name_available(
        &self,
        team_name: &str,
        owner: Option<&TeamId>,
    ) -> Result<(), DomainError> {
        match self.repository.find_by_name(team_name).await? {
            Some(existing) if Some(existing.id()) != owner => {
                warn!(name = %team_name, "Team name already taken");
                Err(DomainError::conflict(TEAM_NAME_TAKEN))
            }
            _ => Ok(()),
        }
    }

    async fn ensure_mails_available(
        &self,
        mails: &[String],
        owner: Option<&TeamId>,
    ) -> Result<(), DomainError> {
        let others = self.repository.find_with_member_mails(mails, owner).await?;

        if others.is_empty() {
            return Ok(());
        }

        let taken: Vec<&str> = mails
            .iter()
            .filter(|mail| others.iter().any(|team| team.has_member_mail(mail)))
            .map(String::as_str)
            .collect();

        warn!(mails = ?taken, "Members already belong to another team");

        Err(DomainError::conflict(format!(
            "The following member(s) are already part of another team: {}",
            taken.join(", ")
        )))
    }
}

fn reject(error: TeamValidationError) -> DomainError {
    DomainError::validation(error.to_string())
}

fn parse_team_id(id: &str) -> Result<TeamId, DomainError> {
    TeamId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))
}

fn team_not_found() -> DomainError {
    DomainError::not_found("Team not found")
}
