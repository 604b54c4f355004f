//! API middleware components

pub mod logging;
pub mod metrics;
pub mod principal;

pub use logging::logging_middleware;
pub use metrics::metrics_middleware;
pub use principal::{RequirePrincipal, RequireTeacher};
