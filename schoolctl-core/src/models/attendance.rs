//! Attendance records, status enum and request schema

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fields::{blank_date, blank_string, flexible_id, positive_id};
use super::validation::{Required, ValidationError};

/// Attendance status, stored as its literal name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [Self::Present, Self::Absent, Self::Late];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Late => "Late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "status",
                value: s.to_owned(),
            })
    }
}

/// Attendance row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Attendance {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub attendance_date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Attendance with student and course display names, as returned by `GET /attendance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AttendanceListing {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub attendance: Attendance,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
}

/// Body of `POST /attendance` and `PUT /attendance/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttendanceInput {
    #[serde(default, deserialize_with = "flexible_id", skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "flexible_id", skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i64>,
    #[serde(default, deserialize_with = "blank_date", skip_serializing_if = "Option::is_none")]
    pub attendance_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAttendance {
    pub student_id: i64,
    pub course_id: i64,
    pub attendance_date: Option<NaiveDate>,
    pub status: AttendanceStatus,
}

impl AttendanceInput {
    pub fn validate(self) -> Result<NewAttendance, ValidationError> {
        let mut required = Required::new();
        let student_id = required.take("student_id", self.student_id);
        let course_id = required.take("course_id", self.course_id);
        required.finish()?;
        let (Some(student_id), Some(course_id)) = (student_id, course_id) else {
            return Err(ValidationError::missing(vec!["student_id", "course_id"]));
        };

        let status = match self.status {
            Some(s) => s.parse()?,
            None => AttendanceStatus::default(),
        };

        Ok(NewAttendance {
            student_id: positive_id("student_id", student_id)?,
            course_id: positive_id("course_id", course_id)?,
            attendance_date: self.attendance_date,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_present() {
        let input: AttendanceInput =
            serde_json::from_str(r#"{"student_id": 1, "course_id": 1, "status": ""}"#).unwrap();
        assert_eq!(input.validate().unwrap().status, AttendanceStatus::Present);
    }

    #[test]
    fn status_is_restricted() {
        let input: AttendanceInput =
            serde_json::from_str(r#"{"student_id": 1, "course_id": 1, "status": "Sick"}"#).unwrap();
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::InvalidVariant {
                field: "status",
                value: "Sick".into()
            }
        );
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in AttendanceStatus::ALL {
            assert_eq!(status.as_str().parse::<AttendanceStatus>().unwrap(), status);
        }
        assert_eq!(serde_json::to_string(&AttendanceStatus::Late).unwrap(), r#""Late""#);
    }
}
