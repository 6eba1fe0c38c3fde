//! Bootstrap administrator account

use sqlx::SqlitePool;

use schoolctl_core::config::DEFAULT_SEED_PASSWORD;
use schoolctl_core::models::DEFAULT_ROLE;
use schoolctl_core::AuthSettings;

use super::{password, AuthError};
use crate::db::repos::{NewUser, UserRepo};

/// Create the seed admin when no account exists yet.
///
/// Returns the new account id, or `None` when users were already present.
/// Without a configured password the well-known default is used and the
/// account is flagged to change it.
pub async fn ensure_admin(
    pool: &SqlitePool,
    settings: &AuthSettings,
) -> Result<Option<i64>, AuthError> {
    let repo = UserRepo::new(pool);
    if repo.count().await? > 0 {
        tracing::debug!("users present, skipping seed");
        return Ok(None);
    }

    let (plain, must_change_password) = match settings.seed_admin_password.as_deref() {
        Some(configured) => (configured.to_string(), false),
        None => {
            tracing::warn!(
                email = %settings.seed_admin_email,
                "seeding admin with the default password; change it after first login"
            );
            (DEFAULT_SEED_PASSWORD.to_string(), true)
        }
    };

    let password_hash = password::hash_password(plain).await?;
    let id = repo
        .create(&NewUser {
            email: settings.seed_admin_email.clone(),
            password_hash,
            first_name: Some("Admin".to_string()),
            last_name: Some("General".to_string()),
            role: DEFAULT_ROLE.to_string(),
            must_change_password,
        })
        .await?;

    tracing::info!(user_id = id, email = %settings.seed_admin_email, "seed admin created");
    Ok(Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::test_support::test_pool;

    #[tokio::test]
    async fn seeds_once() {
        let (pool, _dir) = test_pool().await;
        let settings = AuthSettings::default();

        assert!(ensure_admin(&pool, &settings).await.unwrap().is_some());
        assert!(ensure_admin(&pool, &settings).await.unwrap().is_none());
        assert_eq!(UserRepo::new(&pool).count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn configured_password_is_not_flagged() {
        let (pool, _dir) = test_pool().await;
        let settings = AuthSettings {
            seed_admin_email: "root@school.test".into(),
            seed_admin_password: Some("long-enough-secret".into()),
            ..AuthSettings::default()
        };

        let id = ensure_admin(&pool, &settings).await.unwrap().unwrap();
        let profile = UserRepo::new(&pool).profile(id).await.unwrap();
        assert_eq!(profile.email, "root@school.test");
        assert_eq!(profile.first_name.as_deref(), Some("Admin"));
        assert!(!profile.must_change_password);
    }
}
