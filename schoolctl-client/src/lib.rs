//! schoolctl-client: typed access to the schoolctl JSON API
//!
//! [`ApiClient`] wraps the HTTP surface; [`CrudResource`] keeps the list
//! state of one resource (items, loading, last error, notifications) in sync
//! with the server after each confirmed mutation.

pub mod client;
pub mod error;
pub mod resource;

pub use client::ApiClient;
pub use error::{ClientError, Result};
pub use resource::{CrudResource, Notification, NotificationKind, Record};
