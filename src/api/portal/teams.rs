//! Team endpoints

use axum::extract::{Path, State};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::RequireTeacher;
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json};
use crate::domain::team::{Member, MemberPatch, Team};
use crate::infrastructure::team::{AssignTeacherRequest, CreateTeamRequest, UpdateTeamRequest};

/// Body of `POST /team`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamBody {
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub members: Option<Vec<Member>>,
}

/// Body of `PUT /team/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamBody {
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub members: Option<Vec<MemberPatch>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameBody {
    #[serde(default)]
    pub team_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTeacherBody {
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub teacher_name: String,
    #[serde(default)]
    pub teacher_id: Option<String>,
}

/// POST /team
pub async fn create_team(
    State(state): State<AppState>,
    Json(body): Json<CreateTeamBody>,
) -> Result<ApiResponse<Team>, ApiError> {
    debug!(name = ?body.team_name, "Create team request");

    let request = CreateTeamRequest {
        team_name: body.team_name,
        members: body.members,
    };

    let team = state
        .team_service
        .create(request)
        .await
        .map_err(|e| ApiError::from_domain(e, "Something went wrong while creating the team."))?;

    Ok(ApiResponse::created(team).with_message("Team created successfully."))
}

/// GET /team
pub async fn list_teams(State(state): State<AppState>) -> Result<ApiResponse<Vec<Team>>, ApiError> {
    let teams = state
        .team_service
        .list()
        .await
        .map_err(|e| ApiError::from_domain(e, "Something went wrong"))?;

    Ok(ApiResponse::ok(teams))
}

/// GET /team/{id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Team>, ApiError> {
    debug!(id = %id, "Get team request");

    let team = state
        .team_service
        .get(&id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Something went wrong"))?;

    Ok(ApiResponse::ok(team))
}

/// GET /team/by-teacher
pub async fn teams_by_teacher(
    State(state): State<AppState>,
    RequireTeacher(claims): RequireTeacher,
) -> Result<ApiResponse<Vec<Team>>, ApiError> {
    debug!(user_id = %claims.user_id(), "Teams by teacher request");

    let teams = state
        .team_service
        .list_for_teacher(&claims.email)
        .await
        .map_err(|e| {
            ApiError::from_domain(e, "Something went wrong while fetching team by teacher")
        })?;

    Ok(ApiResponse::ok(teams).with_message("Team retrieved successfully"))
}

/// GET /team/myteam/{educationalmail}
pub async fn teams_by_member(
    State(state): State<AppState>,
    Path(mail): Path<String>,
) -> Result<ApiResponse<Vec<Team>>, ApiError> {
    debug!(mail = %mail, "Teams by member request");

    let teams = state
        .team_service
        .list_for_member(&mail)
        .await
        .map_err(|e| ApiError::from_domain(e, "Something went wrong"))?;

    Ok(ApiResponse::ok(teams).with_message("Teams retrieved successfully"))
}

/// PUT /team/{id}
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTeamBody>,
) -> Result<ApiResponse<Team>, ApiError> {
    debug!(id = %id, "Update team request");

    let request = UpdateTeamRequest {
        team_name: body.team_name,
        members: body.members,
    };

    let team = state
        .team_service
        .update(&id, request)
        .await
        .map_err(|e| ApiError::from_domain(e, "Something went wrong while updating the team."))?;

    Ok(ApiResponse::ok(team).with_message("Team updated successfully."))
}

/// PATCH /team/name/{id}
pub async fn rename_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RenameBody>,
) -> Result<ApiResponse<Team>, ApiError> {
    debug!(id = %id, "Rename team request");

    let team = state
        .team_service
        .rename(&id, &body.team_name)
        .await
        .map_err(|e| ApiError::from_domain(e, "Something went wrong while updating the team."))?;

    Ok(ApiResponse::ok(team).with_message("Team updated successfully"))
}

/// PATCH /team/name{id}, the id glued to the `name` prefix
pub async fn rename_team_prefixed(
    state: State<AppState>,
    Path(segment): Path<String>,
    body: Json<RenameBody>,
) -> Result<ApiResponse<Team>, ApiError> {
    match segment.strip_prefix("name") {
        Some(id) if !id.is_empty() => rename_team(state, Path(id.to_string()), body).await,
        _ => Err(ApiError::not_found("Route not found")),
    }
}

/// PATCH /team/assign-teacher
pub async fn assign_teacher(
    State(state): State<AppState>,
    Json(body): Json<AssignTeacherBody>,
) -> Result<ApiResponse<Team>, ApiError> {
    debug!(team_id = %body.team_id, "Assign teacher request");

    let request = AssignTeacherRequest {
        team_id: body.team_id,
        teacher_name: body.teacher_name,
        teacher_id: body.teacher_id,
    };

    let team = state
        .team_service
        .assign_teacher(request)
        .await
        .map_err(|e| ApiError::from_domain(e, "Something went wrong"))?;

    Ok(ApiResponse::ok(team).with_message("Team updated successfully"))
}

/// DELETE /team/{id}
pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    debug!(id = %id, "Delete team request");

    state
        .team_service
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Something went wrong"))?;

    Ok(ApiResponse::message("Team deleted successfully"))
}
