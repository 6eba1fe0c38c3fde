//! Teacher repository
//!
//! Deleting a teacher leaves their courses in place with `teacher_id`
//! cleared by the database.

use sqlx::SqlitePool;

use schoolctl_core::models::{NewTeacher, Teacher};

use super::{expect_affected, DbError};

const RESOURCE: &str = "teacher";

/// Teacher repository
pub struct TeacherRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TeacherRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All teachers ordered by last name, then first name.
    pub async fn list(&self) -> Result<Vec<Teacher>, DbError> {
        let teachers = sqlx::query_as::<_, Teacher>(
            r#"
            SELECT id, first_name, last_name, email, phone, hire_date
            FROM teachers
            ORDER BY last_name, first_name, id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(teachers)
    }

    pub async fn get(&self, id: i64) -> Result<Teacher, DbError> {
        sqlx::query_as::<_, Teacher>(
            r#"
            SELECT id, first_name, last_name, email, phone, hire_date
            FROM teachers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Insert a teacher; a missing hire date becomes today.
    pub async fn create(&self, teacher: &NewTeacher) -> Result<Teacher, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO teachers (first_name, last_name, email, phone, hire_date)
            VALUES (?, ?, ?, ?, COALESCE(?, DATE('now')))
            "#,
        )
        .bind(&teacher.person.first_name)
        .bind(&teacher.person.last_name)
        .bind(teacher.person.email.as_str())
        .bind(teacher.person.phone.as_deref())
        .bind(teacher.hire_date)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::on_write(RESOURCE, e))?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, teacher: &NewTeacher) -> Result<Teacher, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE teachers
            SET first_name = ?, last_name = ?, email = ?, phone = ?,
                hire_date = COALESCE(?, hire_date)
            WHERE id = ?
            "#,
        )
        .bind(&teacher.person.first_name)
        .bind(&teacher.person.last_name)
        .bind(teacher.person.email.as_str())
        .bind(teacher.person.phone.as_deref())
        .bind(teacher.hire_date)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::on_write(RESOURCE, e))?;

        expect_affected(result, RESOURCE, id)?;
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        expect_affected(result, RESOURCE, id)
    }
}
