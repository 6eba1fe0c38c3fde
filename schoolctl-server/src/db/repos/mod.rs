//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Single parameterized statement per operation
//! - Writes re-read the stored row so defaults are reflected
//! - Constraint violations become `DbError::Conflict` / `DbError::MissingReference`

pub mod attendance;
pub mod courses;
pub mod grades;
pub mod students;
pub mod summary;
pub mod teachers;
pub mod users;

pub use attendance::AttendanceRepo;
pub use courses::CourseRepo;
pub use grades::GradeRepo;
pub use students::StudentRepo;
pub use summary::SummaryRepo;
pub use teachers::TeacherRepo;
pub use users::{NewUser, UserRecord, UserRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {resource} with this email already exists")]
    Conflict { resource: &'static str },

    #[error("{resource} references a record that does not exist")]
    MissingReference { resource: &'static str },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Classify a failed INSERT/UPDATE by the constraint it hit.
    pub(crate) fn on_write(resource: &'static str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::Conflict { resource };
            }
            if db_err.is_foreign_key_violation() {
                return Self::MissingReference { resource };
            }
        }
        Self::Sqlx(err)
    }
}

/// Fail with NotFound when an id-scoped write matched no row
pub(crate) fn expect_affected(
    result: sqlx::sqlite::SqliteQueryResult,
    resource: &'static str,
    id: i64,
) -> Result<(), DbError> {
    if result.rows_affected() == 0 {
        return Err(DbError::not_found(resource, id));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;
    use tempfile::TempDir;

    use crate::db::{create_pool, migrations};

    /// Fresh migrated database; keep the TempDir alive for the test's duration
    pub(crate) async fn test_pool() -> (SqlitePool, TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let pool = create_pool(&dir.path().join("test.sqlite"))
            .await
            .expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        (pool, dir)
    }
}
