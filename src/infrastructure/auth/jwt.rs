//! HS256 bearer token issuing and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::warn;

use crate::config::AuthConfig;
use crate::domain::DomainError;

/// Role name that unlocks teacher-only routes
pub const TEACHER_ROLE: &str = "teacher";

const GENERATED_SECRET_LENGTH: usize = 48;

/// Claims identifying the acting principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrincipalClaims {
    /// Identity provider user id
    pub sub: String,
    /// Educational mail of the principal
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl PrincipalClaims {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
        expiration_hours: u64,
    ) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: user_id.into(),
            email: email.into(),
            role: role.into(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.sub
    }

    pub fn is_teacher(&self) -> bool {
        self.role.eq_ignore_ascii_case(TEACHER_ROLE)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Configuration for JWT service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    /// Use the configured secret, or a random one that only lives for this process
    pub fn from_auth_config(auth: &AuthConfig) -> Self {
        let secret = match auth.jwt_secret.as_deref().map(str::trim) {
            Some(secret) if !secret.is_empty() => secret.to_string(),
            _ => {
                warn!("No auth.jwt_secret configured, generating an ephemeral signing secret");
                rand::thread_rng()
                    .sample_iter(&Alphanumeric)
                    .take(GENERATED_SECRET_LENGTH)
                    .map(char::from)
                    .collect()
            }
        };

        Self::new(secret, auth.token_ttl_hours)
    }
}

/// Trait for bearer token operations
pub trait JwtGenerator: Send + Sync + Debug {
    /// Sign claims into a token
    fn generate(&self, claims: &PrincipalClaims) -> Result<String, DomainError>;

    /// Validate a token and return its claims
    fn validate(&self, token: &str) -> Result<PrincipalClaims, DomainError>;

    fn expiration_hours(&self) -> u64;
}

/// HS256 JWT service
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_hours", &self.config.expiration_hours)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Mint a token for a principal with the configured lifetime
    pub fn issue(
        &self,
        user_id: &str,
        email: &str,
        role: &str,
    ) -> Result<String, DomainError> {
        let claims = PrincipalClaims::new(user_id, email, role, self.config.expiration_hours);
        self.generate(&claims)
    }
}

impl JwtGenerator for JwtService {
    fn generate(&self, claims: &PrincipalClaims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<PrincipalClaims, DomainError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<PrincipalClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::validation(format!("Invalid JWT: {}", e)))?;

        Ok(token_data.claims)
    }

    fn expiration_hours(&self) -> u64 {
        self.config.expiration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-for-testing", 24))
    }

    #[test]
    fn test_issue_and_validate() {
        let service = create_service();

        let token = service
            .issue("user-1", "rahman@cse.bubt.edu.bd", TEACHER_ROLE)
            .unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.user_id(), "user-1");
        assert_eq!(claims.email, "rahman@cse.bubt.edu.bd");
        assert!(claims.is_teacher());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_student_role_is_not_teacher() {
        let claims = PrincipalClaims::new("user-2", "s@cse.bubt.edu.bd", "student", 1);
        assert!(!claims.is_teacher());

        let claims = PrincipalClaims::new("user-2", "t@cse.bubt.edu.bd", "Teacher", 1);
        assert!(claims.is_teacher());
    }

    #[test]
    fn test_invalid_token() {
        let service = create_service();

        assert!(service.validate("not.a.token").is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service = create_service();
        let other = JwtService::new(JwtConfig::new("another-secret", 24));

        let token = other.issue("user-1", "a@cse.bubt.edu.bd", "teacher").unwrap();
        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let service = create_service();
        let now = Utc::now().timestamp();
        let claims = PrincipalClaims {
            sub: "user-1".to_string(),
            email: "a@cse.bubt.edu.bd".to_string(),
            role: "teacher".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };

        let token = service.generate(&claims).unwrap();
        assert!(claims.is_expired());
        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_config_from_auth_settings() {
        let configured = JwtConfig::from_auth_config(&AuthConfig {
            jwt_secret: Some("configured".to_string()),
            token_ttl_hours: 2,
        });
        assert_eq!(configured.secret, "configured");
        assert_eq!(configured.expiration_hours, 2);

        let generated = JwtConfig::from_auth_config(&AuthConfig::default());
        assert_eq!(generated.secret.len(), GENERATED_SECRET_LENGTH);
        assert_eq!(generated.expiration_hours, 24);
    }
}
