//! Authentication - password hashing, bearer tokens and the request gate
//!
//! Login and profile lookups live here so handlers stay thin and the
//! password hash never leaves this module and the user repository.

pub mod middleware;
pub mod password;
pub mod seed;
pub mod token;

use sqlx::SqlitePool;

use schoolctl_core::models::{LoginResponse, UserProfile};

use crate::db::repos::{DbError, UserRepo};

pub use middleware::require_auth;
pub use seed::ensure_admin;
pub use token::{Claims, TokenKeys};

/// Authentication failures
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid or expired token")]
    InvalidToken,

    /// Unknown email and wrong password are deliberately indistinguishable
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("current password is incorrect")]
    WrongPassword,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("token signing failed: {0}")]
    Token(#[source] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Database(#[from] DbError),
}

/// Check credentials and issue a token.
pub async fn login(
    pool: &SqlitePool,
    keys: &TokenKeys,
    email: &str,
    password: String,
) -> Result<LoginResponse, AuthError> {
    let Some(record) = UserRepo::new(pool).find_by_email(email).await? else {
        password::verify_dummy(password).await;
        tracing::info!(email, "login rejected: unknown email");
        return Err(AuthError::InvalidCredentials);
    };

    if !password::verify_password(password, record.password_hash.clone()).await? {
        tracing::info!(user_id = record.id, "login rejected: wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    let user = record.into_profile();
    let token = keys.issue(&user)?;
    tracing::info!(user_id = user.id, "login succeeded");

    Ok(LoginResponse { token, user })
}

/// Current profile for a verified token. A deleted account is `NotFound`.
pub async fn profile(pool: &SqlitePool, claims: &Claims) -> Result<UserProfile, AuthError> {
    Ok(UserRepo::new(pool).profile(claims.id).await?)
}

/// Replace the caller's password after re-checking the current one.
pub async fn change_password(
    pool: &SqlitePool,
    claims: &Claims,
    current: String,
    new: String,
) -> Result<(), AuthError> {
    let repo = UserRepo::new(pool);
    let record = repo.get(claims.id).await?;

    if !password::verify_password(current, record.password_hash).await? {
        return Err(AuthError::WrongPassword);
    }

    let hash = password::hash_password(new).await?;
    repo.set_password(record.id, &hash).await?;
    tracing::info!(user_id = record.id, "password changed");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::test_support::test_pool;
    use schoolctl_core::AuthSettings;

    async fn seeded() -> (SqlitePool, tempfile::TempDir, TokenKeys) {
        let (pool, dir) = test_pool().await;
        ensure_admin(&pool, &AuthSettings::default()).await.unwrap();
        (pool, dir, TokenKeys::new("secret", 7))
    }

    #[tokio::test]
    async fn login_with_seed_account() {
        let (pool, _dir, keys) = seeded().await;

        let response = login(&pool, &keys, "admin@colegio.edu", "admin123".into())
            .await
            .unwrap();
        assert_eq!(response.user.role, "admin");
        assert!(response.user.must_change_password);

        let claims = keys.verify(&response.token).unwrap();
        assert_eq!(claims.id, response.user.id);
    }

    #[tokio::test]
    async fn login_failures_look_the_same() {
        let (pool, _dir, keys) = seeded().await;

        let wrong = login(&pool, &keys, "admin@colegio.edu", "nope".into()).await.unwrap_err();
        let unknown = login(&pool, &keys, "ghost@colegio.edu", "admin123".into()).await.unwrap_err();
        assert_eq!(wrong.to_string(), unknown.to_string());
        assert!(matches!(wrong, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn change_password_rechecks_current() {
        let (pool, _dir, keys) = seeded().await;
        let response = login(&pool, &keys, "admin@colegio.edu", "admin123".into()).await.unwrap();
        let claims = keys.verify(&response.token).unwrap();

        let err = change_password(&pool, &claims, "bad".into(), "new-password".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WrongPassword));

        change_password(&pool, &claims, "admin123".into(), "new-password".into())
            .await
            .unwrap();
        let after = login(&pool, &keys, "admin@colegio.edu", "new-password".into()).await.unwrap();
        assert!(!after.user.must_change_password);
    }
}
