//! Teacher infrastructure implementations

mod repository;
mod service;

pub use repository::StorageTeacherRepository;
pub use service::TeacherDirectory;
