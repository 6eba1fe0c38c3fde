//! Layered configuration for the school API
//!
//! Precedence (lowest first): built-in development defaults,
//! `~/.schoolctl/config.toml`, environment variables, CLI flags
//! (applied by the binary).
//!
//! Environment variables:
//!   HOST, PORT                 # listen address (default: 127.0.0.1:4000)
//!   DB_PATH                    # SQLite file (default: ./school.sqlite)
//!   JWT_SECRET                 # token signing secret (default: dev-secret)
//!   CORS_ORIGIN                # allowed origin (default: any)
//!   SEED_ADMIN_EMAIL           # bootstrap account email
//!   SEED_ADMIN_PASSWORD        # bootstrap account password

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Token secret used when nothing else is configured. Only fit for local development.
pub const DEFAULT_JWT_SECRET: &str = "dev-secret";

/// Seed account email used when `SEED_ADMIN_EMAIL` is not set
pub const DEFAULT_SEED_EMAIL: &str = "admin@colegio.edu";

/// Seed account password used when `SEED_ADMIN_PASSWORD` is not set
pub const DEFAULT_SEED_PASSWORD: &str = "admin123";

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchoolConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Single allowed cross-origin source; `None` allows any origin
    pub cors_origin: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
            cors_origin: None,
        }
    }
}

impl ServerSettings {
    /// Parse host and port into a socket address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| CoreError::config(format!("invalid bind address {}:{}: {}", self.host, self.port, e)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: PathBuf,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("school.sqlite"),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    pub seed_admin_email: String,
    /// When unset the seed account gets [`DEFAULT_SEED_PASSWORD`] and must change it
    pub seed_admin_password: Option<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_days: 7,
            seed_admin_email: DEFAULT_SEED_EMAIL.to_string(),
            seed_admin_password: None,
        }
    }
}

impl AuthSettings {
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl SchoolConfig {
    /// Load config file (if present) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file(&Self::config_path())?;
        config.apply_env()?;
        Ok(config)
    }

    /// Get config file path: ~/.schoolctl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".schoolctl")
            .join("config.toml")
    }

    /// Read a TOML config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CoreError::config_parse(path, e))
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (environment, test fixtures).
    ///
    /// Empty values are ignored so `PORT=` does not clobber the default.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| CoreError::config(format!("PORT must be a port number, got '{}'", port)))?;
        }
        if let Some(origin) = get("CORS_ORIGIN") {
            self.server.cors_origin = Some(origin);
        }
        if let Some(path) = get("DB_PATH") {
            self.database.path = PathBuf::from(path);
        }
        if let Some(secret) = get("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(email) = get("SEED_ADMIN_EMAIL") {
            self.auth.seed_admin_email = email;
        }
        if let Some(password) = get("SEED_ADMIN_PASSWORD") {
            self.auth.seed_admin_password = Some(password);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_local_development() {
        let config = SchoolConfig::default();
        assert_eq!(config.server.bind_addr().unwrap().port(), 4000);
        assert_eq!(config.database.path, PathBuf::from("school.sqlite"));
        assert_eq!(config.auth.token_ttl_days, 7);
        assert!(config.auth.uses_dev_secret());
        assert!(config.server.cors_origin.is_none());
    }

    #[test]
    fn env_overrides_defaults() {
        let mut config = SchoolConfig::default();
        config
            .apply_overrides(lookup(&[
                ("PORT", "8080"),
                ("DB_PATH", "/var/lib/school/db.sqlite"),
                ("JWT_SECRET", "s3cret"),
                ("CORS_ORIGIN", "http://localhost:5173"),
                ("SEED_ADMIN_PASSWORD", "changeme-now"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, PathBuf::from("/var/lib/school/db.sqlite"));
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert!(!config.auth.uses_dev_secret());
        assert_eq!(config.server.cors_origin.as_deref(), Some("http://localhost:5173"));
        assert_eq!(config.auth.seed_admin_password.as_deref(), Some("changeme-now"));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = SchoolConfig::default();
        config.apply_overrides(lookup(&[("PORT", ""), ("JWT_SECRET", "  ")])).unwrap();
        assert_eq!(config.server.port, 4000);
        assert!(config.auth.uses_dev_secret());
    }

    #[test]
    fn bad_port_is_config_error() {
        let mut config = SchoolConfig::default();
        let err = config.apply_overrides(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, CoreError::Config { .. }));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SchoolConfig::from_file(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [server]
            port = 9000

            [auth]
            token_ttl_days = 1
            "#,
        )
        .unwrap();

        let config = SchoolConfig::from_file(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.auth.token_ttl_days, 1);
        assert_eq!(config.auth.seed_admin_email, DEFAULT_SEED_EMAIL);
    }

    #[test]
    fn malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nport = ").unwrap();

        let err = SchoolConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse { .. }));
    }
}
