//! Per-resource list state kept in step with the server
//!
//! A [`CrudResource`] owns the items of one collection (`students`,
//! `grades`, ...). Mutations are applied locally only after the server
//! confirms them, and every mutation leaves a [`Notification`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use schoolctl_core::models::{
    Attendance, AttendanceListing, Course, CourseListing, Grade, GradeListing, Student, Teacher,
};

use crate::client::ApiClient;
use crate::error::{ClientError, Result};

/// A row that can live in a [`CrudResource`]
pub trait Record: DeserializeOwned + Clone {
    fn id(&self) -> i64;
}

impl Record for Student {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Teacher {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Course {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for CourseListing {
    fn id(&self) -> i64 {
        self.course.id
    }
}

impl Record for Grade {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for GradeListing {
    fn id(&self) -> i64 {
        self.grade.id
    }
}

impl Record for Attendance {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for AttendanceListing {
    fn id(&self) -> i64 {
        self.attendance.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Outcome of one mutation, for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    fn error(err: &ClientError) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: err.user_message(),
        }
    }
}

type ListMapper<T> = Box<dyn Fn(Vec<T>) -> Vec<T> + Send + Sync>;

/// List state for one API collection
pub struct CrudResource<T: Record> {
    client: ApiClient,
    path: String,
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    notifications: Vec<Notification>,
    mapper: Option<ListMapper<T>>,
}

impl<T: Record> CrudResource<T> {
    /// Empty state for `path`; call [`fetch_items`](Self::fetch_items) to load.
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into().trim_matches('/').to_string(),
            items: Vec::new(),
            loading: true,
            error: None,
            notifications: Vec::new(),
            mapper: None,
        }
    }

    /// Transform each fetched list before it is stored (sorting, filtering).
    pub fn with_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(Vec<T>) -> Vec<T> + Send + Sync + 'static,
    {
        self.mapper = Some(Box::new(mapper));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed fetch
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Hand pending notifications to the caller and clear them.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Reload the whole list. On failure the previous items stay and `error` is set.
    pub async fn fetch_items(&mut self) -> Result<&[T]> {
        self.loading = true;
        self.error = None;

        let result = self.client.list::<T>(&self.path).await;
        self.loading = false;

        match result {
            Ok(items) => {
                self.items = match &self.mapper {
                    Some(mapper) => mapper(items),
                    None => items,
                };
                tracing::debug!(path = %self.path, count = self.items.len(), "items fetched");
                Ok(&self.items)
            }
            Err(err) => {
                tracing::warn!(path = %self.path, error = %err, "fetch failed");
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Create on the server, then append the stored row.
    pub async fn create_item<B>(&mut self, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
    {
        let result = self.client.create::<B, T>(&self.path, payload).await;
        let item = self.record(result, "record created")?;
        self.items.push(item.clone());
        Ok(item)
    }

    /// Replace on the server, then swap the matching local row.
    pub async fn update_item<B>(&mut self, id: i64, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
    {
        let result = self.client.update::<B, T>(&self.path, id, payload).await;
        let item = self.record(result, "record updated")?;
        for existing in self.items.iter_mut().filter(|existing| existing.id() == id) {
            *existing = item.clone();
        }
        Ok(item)
    }

    /// Delete on the server, then drop the local row.
    pub async fn delete_item(&mut self, id: i64) -> Result<()> {
        let result = self.client.delete(&self.path, id).await;
        self.record(result, "record deleted")?;
        self.items.retain(|item| item.id() != id);
        Ok(())
    }

    fn record<R>(&mut self, result: Result<R>, success: &str) -> Result<R> {
        match result {
            Ok(value) => {
                self.notifications.push(Notification::success(success));
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(path = %self.path, error = %err, "mutation failed");
                self.notifications.push(Notification::error(&err));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_loading_and_empty() {
        let resource: CrudResource<Student> = CrudResource::new(ApiClient::default(), "/students/");
        assert_eq!(resource.path(), "students");
        assert!(resource.loading());
        assert!(resource.items().is_empty());
        assert!(resource.error().is_none());
    }

    #[tokio::test]
    async fn failures_without_token_surface_as_error_and_notification() {
        let mut resource: CrudResource<Teacher> = CrudResource::new(ApiClient::default(), "teachers");

        let err = resource.fetch_items().await.unwrap_err();
        assert!(matches!(err, ClientError::MissingToken));
        assert!(!resource.loading());
        assert_eq!(resource.error(), Some("not authorized: missing token"));

        resource.delete_item(1).await.unwrap_err();
        let notes = resource.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Error);
        assert!(resource.notifications().is_empty());
    }
}
