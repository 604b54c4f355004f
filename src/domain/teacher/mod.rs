//! Teacher domain module
//!
//! Teachers are owned by the identity side of the platform; this service only
//! reads them to resolve the acting principal.

mod entity;
mod repository;

pub use entity::{Teacher, TeacherId, TeacherValidationError};
pub use repository::TeacherRepository;
