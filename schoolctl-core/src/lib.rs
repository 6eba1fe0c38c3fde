//! schoolctl-core: domain records, request validation and configuration
//!
//! Shared by the HTTP server, the client and the CLI. Enable the `sqlx`
//! feature to derive row decoding on the record types.

pub mod config;
pub mod error;
pub mod models;

pub use config::{AuthSettings, DatabaseSettings, SchoolConfig, ServerSettings};
pub use error::{CoreError, Result};
