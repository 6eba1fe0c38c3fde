//! Student records and request schema

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fields::{blank_date, blank_string};
use super::person::{validate_person, PersonFields};
use super::ValidationError;

/// Student row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub enrollment_date: NaiveDate,
}

/// Body of `POST /students` and `PUT /students/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudentInput {
    #[serde(default, deserialize_with = "blank_string", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "blank_string", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "blank_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "blank_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_date", skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<NaiveDate>,
}

/// Validated student, `enrollment_date` defaults to today on insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub person: PersonFields,
    pub enrollment_date: Option<NaiveDate>,
}

impl StudentInput {
    pub fn validate(self) -> Result<NewStudent, ValidationError> {
        let person = validate_person(self.first_name, self.last_name, self.email, self.phone)?;
        Ok(NewStudent {
            person,
            enrollment_date: self.enrollment_date,
        })
    }
}
