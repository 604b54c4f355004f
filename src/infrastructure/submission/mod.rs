//! Submission infrastructure implementations

mod repository;
mod service;

pub use repository::StorageSubmissionRepository;
pub use service::{SubmissionService, SUBMISSION_FIELDS_REQUIRED};
