//! Attendance repository

use sqlx::SqlitePool;

use schoolctl_core::models::{Attendance, AttendanceListing, NewAttendance};

use super::{expect_affected, DbError};

const RESOURCE: &str = "attendance";

/// Attendance repository
pub struct AttendanceRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AttendanceRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All attendance rows, newest first, with student and course names.
    pub async fn list(&self) -> Result<Vec<AttendanceListing>, DbError> {
        let rows = sqlx::query_as::<_, AttendanceListing>(
            r#"
            SELECT
                a.id,
                a.student_id,
                a.course_id,
                a.attendance_date,
                a.status,
                s.first_name || ' ' || s.last_name AS student_name,
                c.name AS course_name
            FROM attendance a
            INNER JOIN students s ON s.id = a.student_id
            INNER JOIN courses c ON c.id = a.course_id
            ORDER BY a.attendance_date DESC, a.id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> Result<Attendance, DbError> {
        sqlx::query_as::<_, Attendance>(
            r#"
            SELECT id, student_id, course_id, attendance_date, status
            FROM attendance
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Insert an attendance row; a missing date becomes today.
    pub async fn create(&self, record: &NewAttendance) -> Result<Attendance, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (student_id, course_id, attendance_date, status)
            VALUES (?, ?, COALESCE(?, DATE('now')), ?)
            "#,
        )
        .bind(record.student_id)
        .bind(record.course_id)
        .bind(record.attendance_date)
        .bind(record.status)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::on_write(RESOURCE, e))?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, record: &NewAttendance) -> Result<Attendance, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE attendance
            SET student_id = ?, course_id = ?,
                attendance_date = COALESCE(?, attendance_date), status = ?
            WHERE id = ?
            "#,
        )
        .bind(record.student_id)
        .bind(record.course_id)
        .bind(record.attendance_date)
        .bind(record.status)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::on_write(RESOURCE, e))?;

        expect_affected(result, RESOURCE, id)?;
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        expect_affected(result, RESOURCE, id)
    }
}
