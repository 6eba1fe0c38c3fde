//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool injected through `AppState`, no global handle
//! - List operations use JOINs for display names - no N+1 queries
//! - Rely on DB constraints (unique, foreign keys, cascades), map their
//!   violations to typed errors - no check-then-insert
//! - Every operation is a single statement against a single row or aggregate

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
