//! HTTP server layer
//!
//! Axum server with:
//! - Bearer token gate on every route except login
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, cors_layer, prepare_state, run_server, AppState, ServerError};
