//! API layer - HTTP endpoints and middleware

pub mod health;
pub mod middleware;
pub mod portal;
pub mod router;
pub mod state;
pub mod types;

pub use middleware::{RequirePrincipal, RequireTeacher};
pub use router::{create_app_router, create_router, create_router_with_state};
pub use state::AppState;
