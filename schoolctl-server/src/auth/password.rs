//! Argon2id password hashing
//!
//! Hashes are PHC strings with an embedded random salt. Both operations
//! are CPU-bound and run on the blocking pool.

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use once_cell::sync::Lazy;
use rand::rngs::OsRng;

use super::AuthError;

/// Hash compared against when the email is unknown, so both login
/// failures cost the same.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_blocking("schoolctl-dummy-password").ok());

fn hash_blocking(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

fn verify_blocking(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Hash(e.to_string())),
    }
}

/// Hash a password for storage.
pub async fn hash_password(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| AuthError::Hash(e.to_string()))?
}

/// Check a password against a stored hash. `Ok(false)` means mismatch.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_blocking(&password, &hash))
        .await
        .map_err(|e| AuthError::Hash(e.to_string()))?
}

/// Burn one verification for an unknown account. Always reports a mismatch.
pub async fn verify_dummy(password: String) -> bool {
    let _ = tokio::task::spawn_blocking(move || {
        if let Some(hash) = DUMMY_HASH.as_deref() {
            let _ = verify_blocking(&password, hash);
        }
    })
    .await;
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("admin123".into()).await.unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("admin123".into(), hash.clone()).await.unwrap());
        assert!(!verify_password("admin124".into(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn salts_differ() {
        let a = hash_password("same".into()).await.unwrap();
        let b = hash_password("same".into()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn corrupt_hash_is_error() {
        let err = verify_password("x".into(), "not-a-phc-string".into()).await.unwrap_err();
        assert!(matches!(err, AuthError::Hash(_)));
    }

    #[tokio::test]
    async fn dummy_never_matches() {
        assert!(!verify_dummy("schoolctl-dummy-password".into()).await);
    }
}
