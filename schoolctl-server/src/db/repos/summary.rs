//! Dashboard aggregation
//!
//! Seven independent read queries fanned out concurrently over the pool.
//! Any failure fails the whole snapshot; there is no partial result.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use schoolctl_core::models::summary::{attendance_rate, format_average};
use schoolctl_core::models::{AttendanceDay, CourseAverage, DashboardSummary, SummaryTotals};

use super::DbError;

/// Number of distinct attendance dates in the trend
const TREND_DAYS: i64 = 7;

/// Read-only summary queries
pub struct SummaryRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SummaryRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn snapshot(&self) -> Result<DashboardSummary, DbError> {
        let (students, teachers, courses, average, (present, total), per_course, trend) = tokio::try_join!(
            self.count("students"),
            self.count("teachers"),
            self.count("courses"),
            self.average_grade(),
            self.attendance_counts(),
            self.grades_per_course(),
            self.attendance_trend(),
        )?;

        Ok(DashboardSummary {
            totals: SummaryTotals {
                students,
                teachers,
                courses,
                average_grade: format_average(average),
                attendance_rate: attendance_rate(present, total),
            },
            grades_per_course: per_course,
            attendance_trend: trend,
        })
    }

    async fn count(&self, table: &'static str) -> Result<i64, DbError> {
        let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(self.pool)
            .await?;
        Ok(total)
    }

    async fn average_grade(&self) -> Result<Option<f64>, DbError> {
        let (average,): (Option<f64>,) = sqlx::query_as("SELECT AVG(grade) FROM grades")
            .fetch_one(self.pool)
            .await?;
        Ok(average)
    }

    /// (present rows, all rows)
    async fn attendance_counts(&self) -> Result<(i64, i64), DbError> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN status = 'Present' THEN 1 ELSE 0 END), 0),
                COUNT(*)
            FROM attendance
            "#,
        )
        .fetch_one(self.pool)
        .await?;
        Ok(counts)
    }

    async fn grades_per_course(&self) -> Result<Vec<CourseAverage>, DbError> {
        let rows: Vec<(String, Option<f64>)> = sqlx::query_as(
            r#"
            SELECT c.name, AVG(g.grade)
            FROM grades g
            INNER JOIN courses c ON c.id = g.course_id
            GROUP BY c.id, c.name
            ORDER BY c.name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(course, average)| CourseAverage {
                course,
                average: format_average(average),
            })
            .collect())
    }

    /// Last distinct dates, returned oldest first
    async fn attendance_trend(&self) -> Result<Vec<AttendanceDay>, DbError> {
        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
            r#"
            SELECT
                attendance_date,
                COALESCE(SUM(CASE WHEN status = 'Present' THEN 1 ELSE 0 END), 0)
            FROM attendance
            GROUP BY attendance_date
            ORDER BY attendance_date DESC
            LIMIT ?
            "#,
        )
        .bind(TREND_DAYS)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .rev()
            .map(|(date, present)| AttendanceDay { date, present })
            .collect())
    }
}
