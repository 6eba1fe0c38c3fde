//! Grade repository

use sqlx::SqlitePool;

use schoolctl_core::models::{Grade, GradeListing, NewGrade};

use super::{expect_affected, DbError};

const RESOURCE: &str = "grade";

/// Grade repository
pub struct GradeRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GradeRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All grades, newest first, with student and course names.
    pub async fn list(&self) -> Result<Vec<GradeListing>, DbError> {
        let grades = sqlx::query_as::<_, GradeListing>(
            r#"
            SELECT
                g.id,
                g.student_id,
                g.course_id,
                g.grade,
                g.grade_date,
                s.first_name || ' ' || s.last_name AS student_name,
                c.name AS course_name
            FROM grades g
            INNER JOIN students s ON s.id = g.student_id
            INNER JOIN courses c ON c.id = g.course_id
            ORDER BY g.grade_date DESC, g.id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(grades)
    }

    pub async fn get(&self, id: i64) -> Result<Grade, DbError> {
        sqlx::query_as::<_, Grade>(
            "SELECT id, student_id, course_id, grade, grade_date FROM grades WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Insert a grade; a missing date becomes today.
    pub async fn create(&self, grade: &NewGrade) -> Result<Grade, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO grades (student_id, course_id, grade, grade_date)
            VALUES (?, ?, ?, COALESCE(?, DATE('now')))
            "#,
        )
        .bind(grade.student_id)
        .bind(grade.course_id)
        .bind(grade.grade)
        .bind(grade.grade_date)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::on_write(RESOURCE, e))?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, grade: &NewGrade) -> Result<Grade, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE grades
            SET student_id = ?, course_id = ?, grade = ?,
                grade_date = COALESCE(?, grade_date)
            WHERE id = ?
            "#,
        )
        .bind(grade.student_id)
        .bind(grade.course_id)
        .bind(grade.grade)
        .bind(grade.grade_date)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::on_write(RESOURCE, e))?;

        expect_affected(result, RESOURCE, id)?;
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM grades WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        expect_affected(result, RESOURCE, id)
    }
}
