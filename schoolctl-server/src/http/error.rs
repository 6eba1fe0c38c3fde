//! API error type with IntoResponse
//!
//! Every failure becomes a `{"error": <code>, "message": <text>}` body.
//! Storage and internal failures are logged and answered with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use schoolctl_core::models::ValidationError;

use crate::auth::AuthError;
use crate::db::repos::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Body or path failed validation (400)
    Validation(ValidationError),

    /// Foreign key points at a missing row (400)
    InvalidReference { resource: &'static str },

    /// Missing or rejected credentials (401)
    Unauthorized { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Unique constraint, duplicate email (409)
    Conflict { resource: &'static str },

    /// Database error (500, logged)
    Database(DbError),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidReference { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            Self::Validation(e) => ("validation_error", e.to_string()),
            Self::InvalidReference { resource } => (
                "validation_error",
                format!("{} references a student, course or teacher that does not exist", resource),
            ),
            Self::Unauthorized { message } => ("unauthorized", message),
            Self::NotFound { resource, id } => {
                ("not_found", format!("{} '{}' not found", resource, id))
            }
            Self::Conflict { resource } => (
                "conflict",
                format!("a {} with this email already exists", resource),
            ),
            Self::Database(e) => {
                tracing::error!(error = %e, "database error");
                ("internal_error", "an internal error occurred".to_string())
            }
            Self::Internal { message } => {
                tracing::error!(%message, "internal error");
                ("internal_error", "an internal error occurred".to_string())
            }
        };

        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict { resource } => Self::Conflict { resource },
            DbError::MissingReference { resource } => Self::InvalidReference { resource },
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::InvalidCredentials
            | AuthError::WrongPassword => Self::Unauthorized {
                message: e.to_string(),
            },
            AuthError::Database(db) => db.into(),
            AuthError::Hash(_) | AuthError::Token(_) => Self::Internal {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::from(ValidationError::missing(vec!["first_name", "email"]));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "missing required fields: first_name, email");
    }

    #[tokio::test]
    async fn db_errors_map_by_kind() {
        let not_found = ApiError::from(DbError::NotFound {
            resource: "student",
            id: "9".into(),
        });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(not_found.into_response()).await["message"],
            "student '9' not found"
        );

        assert_eq!(
            ApiError::from(DbError::Conflict { resource: "teacher" }).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(DbError::MissingReference { resource: "grade" }).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn auth_errors_are_401() {
        let response = ApiError::from(AuthError::MissingToken).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "unauthorized");
        assert_eq!(body["message"], "missing bearer token");
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let response = ApiError::from(AuthError::Hash("salt exploded".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "an internal error occurred");
    }
}
