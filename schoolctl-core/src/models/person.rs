//! Fields shared by students and teachers

use super::fields::{bounded, Email};
use super::validation::{Required, ValidationError};

/// Validated person fields, ready for persistence
#[derive(Debug, Clone, PartialEq)]
pub struct PersonFields {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: Option<String>,
}

/// Validate the person part of a student or teacher body.
///
/// Missing names and email are reported together before format checks run.
pub(crate) fn validate_person(
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
) -> Result<PersonFields, ValidationError> {
    let mut required = Required::new();
    let first_name = required.take("first_name", first_name);
    let last_name = required.take("last_name", last_name);
    let email = required.take("email", email);
    required.finish()?;

    // finish() guarantees all three are present
    let (Some(first_name), Some(last_name), Some(email)) = (first_name, last_name, email) else {
        return Err(ValidationError::missing(vec!["first_name", "last_name", "email"]));
    };

    Ok(PersonFields {
        first_name: bounded("first_name", first_name)?,
        last_name: bounded("last_name", last_name)?,
        email: Email::new(&email)?,
        phone: phone.map(|p| bounded("phone", p)).transpose()?,
    })
}
