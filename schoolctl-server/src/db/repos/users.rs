//! Login account repository
//!
//! Only this module and the auth gate ever see `password_hash`.

use sqlx::{FromRow, SqlitePool};

use schoolctl_core::models::UserProfile;

use super::{expect_affected, DbError};

const RESOURCE: &str = "user";

/// Full account row including the password hash
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub must_change_password: bool,
}

impl UserRecord {
    /// Drop the hash for API output
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            must_change_password: self.must_change_password,
        }
    }
}

/// Account to insert; the hash is computed by the caller
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub must_change_password: bool,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(total)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DbError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, role, must_change_password
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get(&self, id: i64) -> Result<UserRecord, DbError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, role, must_change_password
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    pub async fn profile(&self, id: i64) -> Result<UserProfile, DbError> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, email, first_name, last_name, role, must_change_password
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    pub async fn create(&self, user: &NewUser) -> Result<i64, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name, role, must_change_password)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.first_name.as_deref())
        .bind(user.last_name.as_deref())
        .bind(&user.role)
        .bind(user.must_change_password)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::on_write(RESOURCE, e))?;

        Ok(result.last_insert_rowid())
    }

    /// Store a new hash and clear the change-password flag
    pub async fn set_password(&self, id: i64, password_hash: &str) -> Result<(), DbError> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = ?, must_change_password = 0 WHERE id = ?",
        )
        .bind(password_hash)
        .bind(id)
        .execute(self.pool)
        .await?;

        expect_affected(result, RESOURCE, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::test_support::test_pool;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            password_hash: "$argon2id$placeholder".into(),
            first_name: Some("Admin".into()),
            last_name: None,
            role: "admin".into(),
            must_change_password: true,
        }
    }

    #[tokio::test]
    async fn profile_hides_hash_and_reads_flag() {
        let (pool, _dir) = test_pool().await;
        let repo = UserRepo::new(&pool);

        let id = repo.create(&new_user("admin@colegio.edu")).await.unwrap();
        let profile = repo.profile(id).await.unwrap();
        assert_eq!(profile.email, "admin@colegio.edu");
        assert!(profile.must_change_password);

        repo.set_password(id, "$argon2id$other").await.unwrap();
        let record = repo.find_by_email("admin@colegio.edu").await.unwrap().unwrap();
        assert_eq!(record.password_hash, "$argon2id$other");
        assert!(!record.must_change_password);
    }

    #[tokio::test]
    async fn unknown_user() {
        let (pool, _dir) = test_pool().await;
        let repo = UserRepo::new(&pool);

        assert!(repo.find_by_email("ghost@colegio.edu").await.unwrap().is_none());
        assert!(matches!(repo.profile(7).await.unwrap_err(), DbError::NotFound { .. }));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
