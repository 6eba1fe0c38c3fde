//! Command implementations for schoolctl CLI

pub mod api;
pub mod serve;

pub use api::{run_list, run_login, run_me, run_summary};
pub use serve::run_serve;
