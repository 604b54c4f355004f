//! Capstone portal endpoints: teams and submitted files

pub mod submissions;
pub mod teams;

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::state::AppState;

/// Create the portal router
pub fn create_portal_router() -> Router<AppState> {
    Router::new()
        // Teams
        .route("/team", post(teams::create_team).get(teams::list_teams))
        .route("/team/by-teacher", get(teams::teams_by_teacher))
        .route("/team/myteam/{educationalmail}", get(teams::teams_by_member))
        .route("/team/assign-teacher", patch(teams::assign_teacher))
        .route("/team/name/{id}", patch(teams::rename_team))
        .route(
            "/team/{id}",
            get(teams::get_team)
                .put(teams::update_team)
                .patch(teams::rename_team_prefixed)
                .delete(teams::delete_team),
        )
        // Submitted files
        .route(
            "/submittedFile",
            post(submissions::submit_file).get(submissions::list_files),
        )
        .route("/submittedFilebyteacher", get(submissions::files_by_teacher))
        .route(
            "/submittedFile/approve/{id}",
            patch(submissions::approve_file),
        )
        .route(
            "/submittedFile/decline/{id}",
            patch(submissions::decline_file),
        )
}
