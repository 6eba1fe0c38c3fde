//! Signed bearer tokens (HS256 JWT)

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use schoolctl_core::models::UserProfile;

use super::AuthError;

/// Token payload, attached to the request once verified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys derived from the configured secret
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Issue a token for `user` valid for the configured TTL.
    pub fn issue(&self, user: &UserProfile) -> Result<String, AuthError> {
        self.issue_at(user, Utc::now())
    }

    fn issue_at(&self, user: &UserProfile, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(AuthError::Token)
    }

    /// Check signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                AuthError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> UserProfile {
        UserProfile {
            id: 1,
            email: "admin@colegio.edu".into(),
            first_name: Some("Admin".into()),
            last_name: Some("General".into()),
            role: "admin".into(),
            must_change_password: false,
        }
    }

    #[test]
    fn issue_then_verify() {
        let keys = TokenKeys::new("secret", 7);
        let token = keys.issue(&admin()).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.id, 1);
        assert_eq!(claims.email, "admin@colegio.edu");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = TokenKeys::new("secret", 7).issue(&admin()).unwrap();
        let err = TokenKeys::new("other", 7).verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn expired_token_rejected() {
        let keys = TokenKeys::new("secret", 7);
        let token = keys
            .issue_at(&admin(), Utc::now() - Duration::days(8))
            .unwrap();
        assert!(matches!(keys.verify(&token).unwrap_err(), AuthError::InvalidToken));
    }

    #[test]
    fn garbage_rejected() {
        let keys = TokenKeys::new("secret", 7);
        assert!(matches!(keys.verify("not.a.jwt").unwrap_err(), AuthError::InvalidToken));
    }
}
