//! Grade records and request schema

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fields::{blank_date, flexible_id, positive_id};
use super::validation::{Required, ValidationError};

/// Grade row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub grade: f64,
    pub grade_date: NaiveDate,
}

/// Grade with student and course display names, as returned by `GET /grades`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct GradeListing {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub grade: Grade,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
}

/// Body of `POST /grades` and `PUT /grades/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradeInput {
    #[serde(default, deserialize_with = "flexible_id", skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "flexible_id", skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<f64>,
    #[serde(default, deserialize_with = "blank_date", skip_serializing_if = "Option::is_none")]
    pub grade_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGrade {
    pub student_id: i64,
    pub course_id: i64,
    pub grade: f64,
    pub grade_date: Option<NaiveDate>,
}

impl GradeInput {
    pub fn validate(self) -> Result<NewGrade, ValidationError> {
        let mut required = Required::new();
        let student_id = required.take("student_id", self.student_id);
        let course_id = required.take("course_id", self.course_id);
        let grade = required.take("grade", self.grade);
        required.finish()?;
        let (Some(student_id), Some(course_id), Some(grade)) = (student_id, course_id, grade) else {
            return Err(ValidationError::missing(vec!["student_id", "course_id", "grade"]));
        };

        if !grade.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field: "grade",
                reason: "must be a finite number",
            });
        }

        Ok(NewGrade {
            student_id: positive_id("student_id", student_id)?,
            course_id: positive_id("course_id", course_id)?,
            grade,
            grade_date: self.grade_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_grade_is_present() {
        let input: GradeInput =
            serde_json::from_str(r#"{"student_id": 1, "course_id": 2, "grade": 0}"#).unwrap();
        let grade = input.validate().unwrap();
        assert_eq!(grade.grade, 0.0);
        assert!(grade.grade_date.is_none());
    }

    #[test]
    fn missing_grade_fields() {
        let input: GradeInput = serde_json::from_str(r#"{"course_id": 2}"#).unwrap();
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::Missing {
                fields: vec!["student_id", "grade"]
            }
        );
    }

    #[test]
    fn grade_must_be_a_number() {
        let result: Result<GradeInput, _> =
            serde_json::from_str(r#"{"student_id": 1, "course_id": 2, "grade": "A+"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn negative_reference_rejected() {
        let input: GradeInput =
            serde_json::from_str(r#"{"student_id": -1, "course_id": 2, "grade": 12.5}"#).unwrap();
        assert!(matches!(
            input.validate().unwrap_err(),
            ValidationError::InvalidFormat { field: "student_id", .. }
        ));
    }
}
