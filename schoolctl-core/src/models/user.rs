//! Login accounts: public projection and auth request bodies

use serde::{Deserialize, Serialize};

use super::fields::blank_string;
use super::validation::{Required, ValidationError};

/// Role given to accounts created without an explicit role
pub const DEFAULT_ROLE: &str = "admin";

/// Minimum accepted password length on change
pub const MIN_PASSWORD_LEN: usize = 8;

/// Account as exposed over the API (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    #[serde(default)]
    pub must_change_password: bool,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "blank_string")]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    /// Both fields must be present; no format checks so login never leaks which rule failed.
    pub fn validate(self) -> Result<(String, String), ValidationError> {
        let mut required = Required::new();
        let email = required.take("email", self.email);
        let password = required.take("password", self.password.filter(|p| !p.is_empty()));
        required.finish()?;
        match (email, password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(ValidationError::missing(vec!["email", "password"])),
        }
    }
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Body of `PUT /auth/password`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

impl ChangePasswordRequest {
    pub fn validate(self) -> Result<(String, String), ValidationError> {
        let mut required = Required::new();
        let current = required.take("current_password", self.current_password.filter(|p| !p.is_empty()));
        let new = required.take("new_password", self.new_password.filter(|p| !p.is_empty()));
        required.finish()?;
        let (Some(current), Some(new)) = (current, new) else {
            return Err(ValidationError::missing(vec!["current_password", "new_password"]));
        };

        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::InvalidFormat {
                field: "new_password",
                reason: "must be at least 8 characters",
            });
        }

        Ok((current, new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        let req: LoginRequest = serde_json::from_str(r#"{"email": "a@b.co", "password": ""}"#).unwrap();
        assert_eq!(req.validate().unwrap_err().to_string(), "password is required");

        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(
            req.validate().unwrap_err().to_string(),
            "missing required fields: email, password"
        );
    }

    #[test]
    fn login_keeps_password_verbatim() {
        let (_, password) = LoginRequest::new("a@b.co", " spaced ").validate().unwrap();
        assert_eq!(password, " spaced ");
    }

    #[test]
    fn short_new_password_rejected() {
        let req = ChangePasswordRequest {
            current_password: Some("admin123".into()),
            new_password: Some("short".into()),
        };
        assert!(matches!(
            req.validate().unwrap_err(),
            ValidationError::InvalidFormat { field: "new_password", .. }
        ));
    }
}
