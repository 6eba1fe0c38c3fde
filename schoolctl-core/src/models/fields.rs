//! Field-level parsing shared by the request schemas
//!
//! Dashboard forms submit blank strings for untouched inputs and
//! select boxes submit ids as strings, so both are normalized here.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer};

use super::ValidationError;

/// Maximum length for names and other short text fields
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length for an email address
const MAX_EMAIL_LEN: usize = 254;

/// Date wire format (also the SQLite storage format)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create a new email, checking for a `local@domain.tld` shape.
    ///
    /// # Example
    /// ```
    /// use schoolctl_core::models::Email;
    ///
    /// assert!(Email::new("ada@colegio.edu").is_ok());
    /// assert!(Email::new("ada").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::missing(vec!["email"]));
        }

        if trimmed.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }

        if !EMAIL_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like name@domain.tld",
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Enforce the short-text length cap
pub(crate) fn bounded(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LEN,
        });
    }
    Ok(value)
}

/// Reject zero and negative references
pub(crate) fn positive_id(field: &'static str, id: i64) -> Result<i64, ValidationError> {
    if id <= 0 {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a positive id",
        });
    }
    Ok(id)
}

/// Deserialize an optional string, treating blank as absent
pub(crate) fn blank_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty()))
}

/// Deserialize an optional `YYYY-MM-DD` date, treating blank as absent
pub(crate) fn blank_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    blank_string(deserializer)?
        .map(|s| {
            NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|_| {
                de::Error::custom(format!("invalid date '{}', expected YYYY-MM-DD", s))
            })
        })
        .transpose()
}

/// Deserialize an optional id given as a JSON integer or a numeric string
pub(crate) fn flexible_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Str(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Int(id)) => Ok(Some(id)),
        Some(RawId::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(RawId::Str(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid id '{}'", s))),
    }
}
