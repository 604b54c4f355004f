//! Submission domain module
//!
//! A submission is a project file a team hands in for review. It starts out
//! pending and private; the supervising teacher either approves it (which
//! publishes it) or declines it with feedback.

mod entity;
mod repository;

pub use entity::{
    NewSubmission, SubmissionError, SubmissionId, SubmissionStatus, SubmittedFile,
    DEFAULT_DECLINE_MESSAGE,
};
pub use repository::SubmissionRepository;
