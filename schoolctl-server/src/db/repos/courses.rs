//! Course repository
//!
//! Listing LEFT JOINs teachers for a display name; the name is
//! computed per query, never stored.

use sqlx::SqlitePool;

use schoolctl_core::models::{Course, CourseListing, NewCourse};

use super::{expect_affected, DbError};

const RESOURCE: &str = "course";

/// Course repository
pub struct CourseRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CourseRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All courses by name, with the assigned teacher's full name (if any).
    pub async fn list(&self) -> Result<Vec<CourseListing>, DbError> {
        let courses = sqlx::query_as::<_, CourseListing>(
            r#"
            SELECT
                c.id,
                c.name,
                c.description,
                c.teacher_id,
                t.first_name || ' ' || t.last_name AS teacher_name
            FROM courses c
            LEFT JOIN teachers t ON t.id = c.teacher_id
            ORDER BY c.name, c.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(courses)
    }

    pub async fn get(&self, id: i64) -> Result<Course, DbError> {
        sqlx::query_as::<_, Course>(
            "SELECT id, name, description, teacher_id FROM courses WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    pub async fn create(&self, course: &NewCourse) -> Result<Course, DbError> {
        let result = sqlx::query(
            "INSERT INTO courses (name, description, teacher_id) VALUES (?, ?, ?)",
        )
        .bind(&course.name)
        .bind(course.description.as_deref())
        .bind(course.teacher_id)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::on_write(RESOURCE, e))?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, course: &NewCourse) -> Result<Course, DbError> {
        let result = sqlx::query(
            "UPDATE courses SET name = ?, description = ?, teacher_id = ? WHERE id = ?",
        )
        .bind(&course.name)
        .bind(course.description.as_deref())
        .bind(course.teacher_id)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::on_write(RESOURCE, e))?;

        expect_affected(result, RESOURCE, id)?;
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        expect_affected(result, RESOURCE, id)
    }
}
