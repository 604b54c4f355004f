//! Team infrastructure implementations

mod repository;
mod service;

pub use repository::StorageTeamRepository;
pub use service::{
    AssignTeacherRequest, CreateTeamRequest, TeamService, UpdateTeamRequest,
    TEACHER_ALREADY_ASSIGNED, TEAM_NAME_TAKEN,
};
