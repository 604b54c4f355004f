//! Bearer token extractors for the acting principal

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::auth::PrincipalClaims;

/// Any authenticated principal
#[derive(Debug, Clone)]
pub struct RequirePrincipal(pub PrincipalClaims);

/// An authenticated principal holding the teacher role
#[derive(Debug, Clone)]
pub struct RequireTeacher(pub PrincipalClaims);

impl FromRequestParts<AppState> for RequirePrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        debug!("Validating bearer token");

        let claims = state.jwt_service.validate(&token).map_err(|e| {
            warn!(error = %e, "Rejected bearer token");
            ApiError::unauthorized("Invalid or expired token")
        })?;

        Ok(RequirePrincipal(claims))
    }
}

impl FromRequestParts<AppState> for RequireTeacher {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequirePrincipal(claims) = RequirePrincipal::from_request_parts(parts, state).await?;

        if !claims.is_teacher() {
            warn!(user_id = %claims.user_id(), role = %claims.role, "Teacher role required");
            return Err(ApiError::forbidden("Access denied"));
        }

        Ok(RequireTeacher(claims))
    }
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    match token {
        Some(token) => Ok(token.to_string()),
        None => Err(ApiError::unauthorized("Unauthorized request")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    use crate::infrastructure::auth::{JwtConfig, JwtService, TEACHER_ROLE};
    use crate::AppConfig;

    const SECRET: &str = "principal-test-secret";

    async fn state() -> AppState {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some(SECRET.to_string());
        crate::create_app_state_with_config(&config).await.unwrap()
    }

    fn parts_with_token(role: &str) -> Parts {
        let token = JwtService::new(JwtConfig::new(SECRET, 1))
            .issue("user-1", "user@cse.bubt.edu.bd", role)
            .unwrap();
        Request::builder()
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        let token = extract_bearer_token(&headers_with("Bearer   abc.def.ghi  ")).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn test_missing_or_foreign_scheme_is_unauthorized() {
        for headers in [
            HeaderMap::new(),
            headers_with("Basic dXNlcjpwYXNz"),
            headers_with("Bearer "),
        ] {
            let err = extract_bearer_token(&headers).unwrap_err();
            assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_teacher_token_passes_role_check() {
        let state = state().await;
        let mut parts = parts_with_token(TEACHER_ROLE);

        let RequireTeacher(claims) = RequireTeacher::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(claims.user_id(), "user-1");
    }

    #[tokio::test]
    async fn test_student_token_is_forbidden_for_teacher_routes() {
        let state = state().await;

        let RequirePrincipal(claims) =
            RequirePrincipal::from_request_parts(&mut parts_with_token("student"), &state)
                .await
                .unwrap();
        assert!(!claims.is_teacher());

        let err = RequireTeacher::from_request_parts(&mut parts_with_token("student"), &state)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_unauthorized() {
        let state = state().await;
        let token = JwtService::new(JwtConfig::new("another-secret", 1))
            .issue("user-1", "user@cse.bubt.edu.bd", TEACHER_ROLE)
            .unwrap();
        let (mut parts, _) = Request::builder()
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(())
            .unwrap()
            .into_parts();

        let err = RequirePrincipal::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}
