//! Project file submission endpoints

use axum::{
    body::Bytes,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::api::middleware::RequireTeacher;
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json};
use crate::domain::submission::{NewSubmission, SubmittedFile};

/// Optional feedback sent with a decline
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeclineBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl DeclineBody {
    /// An empty body means no feedback
    fn parse(bytes: &[u8]) -> Result<Self, ApiError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(bytes).map_err(|e| {
            warn!(error = %e, "Rejected decline body");
            ApiError::bad_request(format!("Failed to parse the request body as JSON: {}", e))
        })
    }
}

/// POST /submittedFile
pub async fn submit_file(
    State(state): State<AppState>,
    Json(body): Json<NewSubmission>,
) -> Result<ApiResponse<SubmittedFile>, ApiError> {
    debug!(project = %body.project_name, "Submit file request");

    let file = state
        .submission_service
        .create(body)
        .await
        .map_err(|e| ApiError::from_domain(e, "Something went wrong while submitting the file."))?;

    Ok(ApiResponse::created(file).with_message("File submitted successfully."))
}

/// GET /submittedFile
pub async fn list_files(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<SubmittedFile>>, ApiError> {
    let files = state
        .submission_service
        .list()
        .await
        .map_err(|e| ApiError::from_domain(e, "Could not fetch submitted files."))?;

    Ok(ApiResponse::ok(files))
}

/// GET /submittedFilebyteacher
pub async fn files_by_teacher(
    State(state): State<AppState>,
    RequireTeacher(claims): RequireTeacher,
) -> Result<ApiResponse<Vec<SubmittedFile>>, ApiError> {
    debug!(user_id = %claims.user_id(), "Files by teacher request");

    let files = state
        .submission_service
        .list_for_teacher(claims.user_id())
        .await
        .map_err(|e| ApiError::from_domain(e, "Could not fetch submitted files by teacher"))?;

    Ok(ApiResponse::ok(files))
}

/// PATCH /submittedFile/approve/{id}
pub async fn approve_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<SubmittedFile>, ApiError> {
    debug!(id = %id, "Approve submission request");

    let file = state
        .submission_service
        .approve(&id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Something went wrong while approving."))?;

    Ok(ApiResponse::ok(file).with_message("Submission approved and made public."))
}

/// PATCH /submittedFile/decline/{id}
pub async fn decline_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<ApiResponse<SubmittedFile>, ApiError> {
    debug!(id = %id, "Decline submission request");

    let DeclineBody { message } = DeclineBody::parse(&body)?;

    let file = state
        .submission_service
        .decline(&id, message.as_deref())
        .await
        .map_err(|e| ApiError::from_domain(e, "Something went wrong while declining."))?;

    Ok(ApiResponse::ok(file).with_message("Submission feedback saved."))
}
