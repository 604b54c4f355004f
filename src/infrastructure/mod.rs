//! Infrastructure layer - Storage backends, services and runtime plumbing

pub mod auth;
pub mod logging;
pub mod observability;
pub mod storage;
pub mod submission;
pub mod teacher;
pub mod team;
