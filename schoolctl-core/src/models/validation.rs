//! Validation error types

use std::fmt;

/// Validation error for request bodies and domain fields
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// One or more required fields were absent or blank
    Missing { fields: Vec<&'static str> },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., email)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Invalid enum variant
    InvalidVariant { field: &'static str, value: String },

    /// Body could not be parsed into the expected shape
    Malformed { reason: String },
}

impl ValidationError {
    pub fn missing(fields: Vec<&'static str>) -> Self {
        Self::Missing { fields }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { fields } if fields.len() == 1 => {
                write!(f, "{} is required", fields[0])
            }
            Self::Missing { fields } => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
            Self::Malformed { reason } => write!(f, "invalid request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Collects missing required fields so a request reports all of them at once.
#[derive(Debug, Default)]
pub(crate) struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Take a required value, recording the field name if absent.
    pub(crate) fn take<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(field);
        }
        value
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::missing(self.missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "first_name",
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "first_name exceeds maximum length of 100 characters"
        );
    }

    #[test]
    fn missing_lists_every_field() {
        let mut req = Required::new();
        req.take::<String>("first_name", None);
        req.take("last_name", Some("Lovelace".to_string()));
        req.take::<String>("email", None);

        let err = req.finish().unwrap_err();
        assert_eq!(err.to_string(), "missing required fields: first_name, email");
    }

    #[test]
    fn single_missing_field() {
        let err = ValidationError::missing(vec!["name"]);
        assert_eq!(err.to_string(), "name is required");
    }
}
