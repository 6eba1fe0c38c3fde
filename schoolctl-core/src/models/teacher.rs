//! Teacher records and request schema

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fields::{blank_date, blank_string};
use super::person::{validate_person, PersonFields};
use super::ValidationError;

/// Teacher row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Teacher {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub hire_date: NaiveDate,
}

/// Body of `POST /teachers` and `PUT /teachers/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeacherInput {
    #[serde(default, deserialize_with = "blank_string", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "blank_string", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "blank_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "blank_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_date", skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTeacher {
    pub person: PersonFields,
    pub hire_date: Option<NaiveDate>,
}

impl TeacherInput {
    pub fn validate(self) -> Result<NewTeacher, ValidationError> {
        let person = validate_person(self.first_name, self.last_name, self.email, self.phone)?;
        Ok(NewTeacher {
            person,
            hire_date: self.hire_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_email_is_rejected() {
        let input: TeacherInput = serde_json::from_str(
            r#"{"first_name": "Alan", "last_name": "Turing", "email": "alan"}"#,
        )
        .unwrap();
        assert!(matches!(
            input.validate().unwrap_err(),
            ValidationError::InvalidFormat { field: "email", .. }
        ));
    }

    #[test]
    fn hire_date_optional() {
        let input: TeacherInput = serde_json::from_str(
            r#"{"first_name": "Alan", "last_name": "Turing", "email": "alan@colegio.edu", "hire_date": ""}"#,
        )
        .unwrap();
        let teacher = input.validate().unwrap();
        assert!(teacher.hire_date.is_none());
    }
}
