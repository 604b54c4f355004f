//! Authentication infrastructure module
//!
//! Bearer tokens are minted by the identity side of the platform; this
//! module validates them and can issue tokens for local use.

mod jwt;

pub use jwt::{JwtConfig, JwtGenerator, JwtService, PrincipalClaims, TEACHER_ROLE};
