//! Route handlers organized by resource

pub mod attendance;
pub mod auth;
pub mod courses;
pub mod grades;
pub mod students;
pub mod summary;
pub mod teachers;
