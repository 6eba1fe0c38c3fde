//! Course records and request schema

use serde::{Deserialize, Serialize};

use super::fields::{blank_string, bounded, flexible_id, positive_id};
use super::validation::{Required, ValidationError};

/// Course row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Cleared by the database when the teacher is deleted
    pub teacher_id: Option<i64>,
}

/// Course with the teacher's display name, as returned by `GET /courses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CourseListing {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub course: Course,
    #[serde(default)]
    pub teacher_name: Option<String>,
}

/// Body of `POST /courses` and `PUT /courses/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseInput {
    #[serde(default, deserialize_with = "blank_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "blank_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flexible_id", skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: Option<i64>,
}

impl CourseInput {
    pub fn validate(self) -> Result<NewCourse, ValidationError> {
        let mut required = Required::new();
        let name = required.take("name", self.name);
        required.finish()?;
        let Some(name) = name else {
            return Err(ValidationError::missing(vec!["name"]));
        };

        Ok(NewCourse {
            name: bounded("name", name)?,
            description: self.description,
            teacher_id: self.teacher_id.map(|id| positive_id("teacher_id", id)).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        let input: CourseInput = serde_json::from_str(r#"{"description": "Algebra"}"#).unwrap();
        assert_eq!(input.validate().unwrap_err().to_string(), "name is required");
    }

    #[test]
    fn teacher_is_optional_and_may_be_string() {
        let input: CourseInput =
            serde_json::from_str(r#"{"name": "Math", "teacher_id": ""}"#).unwrap();
        assert_eq!(input.validate().unwrap().teacher_id, None);

        let input: CourseInput =
            serde_json::from_str(r#"{"name": "Math", "teacher_id": "3"}"#).unwrap();
        assert_eq!(input.validate().unwrap().teacher_id, Some(3));
    }

    #[test]
    fn listing_flattens_course() {
        let listing = CourseListing {
            course: Course {
                id: 1,
                name: "Math".into(),
                description: None,
                teacher_id: Some(2),
            },
            teacher_name: Some("Alan Turing".into()),
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["name"], "Math");
        assert_eq!(json["teacher_name"], "Alan Turing");

        // A plain course body decodes as a listing without a name
        let plain: CourseListing =
            serde_json::from_str(r#"{"id": 1, "name": "Math", "description": null, "teacher_id": null}"#)
                .unwrap();
        assert!(plain.teacher_name.is_none());
    }
}
