//! schoolctl-server: JSON API for school administration
//!
//! Students, teachers, courses, grades and attendance stored in SQLite,
//! served over axum behind JWT bearer authentication.
//!
//! # Example
//!
//! ```ignore
//! let config = SchoolConfig::load()?;
//! schoolctl_server::run_server(&config).await?;
//! ```

pub mod auth;
pub mod db;
pub mod http;

pub use auth::{AuthError, Claims, TokenKeys};
pub use db::repos::DbError;
pub use http::{build_router, cors_layer, prepare_state, run_server, ApiError, AppState, ServerError};
