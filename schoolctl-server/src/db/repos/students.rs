//! Student repository
//!
//! Email uniqueness is enforced by the table; deleting a student
//! cascades to its grades and attendance rows.

use sqlx::SqlitePool;

use schoolctl_core::models::{NewStudent, Student};

use super::{expect_affected, DbError};

const RESOURCE: &str = "student";

/// Student repository
pub struct StudentRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StudentRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All students ordered by last name, then first name.
    pub async fn list(&self) -> Result<Vec<Student>, DbError> {
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, first_name, last_name, email, phone, enrollment_date
            FROM students
            ORDER BY last_name, first_name, id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(students)
    }

    pub async fn get(&self, id: i64) -> Result<Student, DbError> {
        sqlx::query_as::<_, Student>(
            r#"
            SELECT id, first_name, last_name, email, phone, enrollment_date
            FROM students
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Insert a student; a missing enrollment date becomes today.
    pub async fn create(&self, student: &NewStudent) -> Result<Student, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO students (first_name, last_name, email, phone, enrollment_date)
            VALUES (?, ?, ?, ?, COALESCE(?, DATE('now')))
            "#,
        )
        .bind(&student.person.first_name)
        .bind(&student.person.last_name)
        .bind(student.person.email.as_str())
        .bind(student.person.phone.as_deref())
        .bind(student.enrollment_date)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::on_write(RESOURCE, e))?;

        self.get(result.last_insert_rowid()).await
    }

    /// Replace every column; a missing enrollment date keeps the stored one.
    pub async fn update(&self, id: i64, student: &NewStudent) -> Result<Student, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE students
            SET first_name = ?, last_name = ?, email = ?, phone = ?,
                enrollment_date = COALESCE(?, enrollment_date)
            WHERE id = ?
            "#,
        )
        .bind(&student.person.first_name)
        .bind(&student.person.last_name)
        .bind(student.person.email.as_str())
        .bind(student.person.phone.as_deref())
        .bind(student.enrollment_date)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::on_write(RESOURCE, e))?;

        expect_affected(result, RESOURCE, id)?;
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        expect_affected(result, RESOURCE, id)
    }
}
