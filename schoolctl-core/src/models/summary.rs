//! Dashboard snapshot returned by `GET /summary`

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub totals: SummaryTotals,
    pub grades_per_course: Vec<CourseAverage>,
    /// Chronological, oldest first
    pub attendance_trend: Vec<AttendanceDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub students: i64,
    pub teachers: i64,
    pub courses: i64,
    /// Two decimals, "0.00" when there are no grades
    pub average_grade: String,
    /// Whole percent of attendance rows marked present
    pub attendance_rate: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseAverage {
    pub course: String,
    pub average: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceDay {
    pub date: NaiveDate,
    pub present: i64,
}

/// Format an average to two decimals, "0.00" when absent.
///
/// Ties round up (12.125 -> "12.13"); plain `{:.2}` would round them to even.
pub fn format_average(average: Option<f64>) -> String {
    let value = average.unwrap_or(0.0);
    format!("{:.2}", (value * 100.0).round() / 100.0)
}

/// Present share of all rows as a rounded whole percent, 0 when there are no rows
pub fn attendance_rate(present: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    ((present as f64 / total as f64) * 100.0).round() as i64
}
