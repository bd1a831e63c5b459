use std::path::PathBuf;
use std::str::FromStr;

use jambakan_core::session::{
    SessionPolicy, DEFAULT_IDLE_TIMEOUT_MINS, DEFAULT_MAX_LIFETIME_MINS,
    DEFAULT_WARNING_LEAD_MINS,
};
use sqlx::postgres::PgConnectOptions;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub database: DatabaseConfig,
    /// JWT signing configuration.
    pub jwt: JwtConfig,
    /// Idle, warning and lifetime thresholds for admin sessions.
    pub session: SessionPolicy,
    pub upload: UploadConfig,
    /// Credentials for the first admin account, seeded when none exists.
    pub admin: AdminBootstrapConfig,
}

/// PostgreSQL connection settings.
///
/// `DATABASE_URL` wins when set; otherwise the discrete `DB_*` variables are
/// combined.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url);
        }
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name))
    }
}

/// Where uploaded images are written and how they are named.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Destination directory, created on first upload (default: `public/uploads`).
    pub dir: PathBuf,
    /// File name prefix (default: `upload`).
    pub prefix: String,
}

#[derive(Debug, Clone)]
pub struct AdminBootstrapConfig {
    pub username: String,
    /// No account is seeded when unset.
    pub password: Option<String>,
    pub email: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATABASE_URL`         | built from `DB_*`          |
    /// | `DB_HOST`              | `localhost`                |
    /// | `DB_PORT`              | `5432`                     |
    /// | `DB_USER`              | `postgres`                 |
    /// | `DB_PASSWORD`          | (empty)                    |
    /// | `DB_NAME`              | `desa_jambakan`            |
    /// | `DB_MAX_CONNECTIONS`   | `10`                       |
    /// | `SESSION_IDLE_MINS`    | `15`                       |
    /// | `SESSION_WARNING_MINS` | `2`                        |
    /// | `SESSION_MAX_MINS`     | `30`                       |
    /// | `UPLOAD_DIR`           | `public/uploads`           |
    /// | `UPLOAD_PREFIX`        | `upload`                   |
    /// | `ADMIN_USERNAME`       | `admin`                    |
    /// | `ADMIN_PASSWORD`       | --                         |
    /// | `ADMIN_EMAIL`          | `admin@desajambakan.id`    |
    ///
    /// # Panics
    ///
    /// Panics on malformed numeric values or an inconsistent session policy.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = parse_env("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_env("REQUEST_TIMEOUT_SECS", 30);

        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL").ok().filter(|u| !u.is_empty()),
            host: std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".into()),
            port: parse_env("DB_PORT", 5432),
            user: std::env::var("DB_USER").unwrap_or_else(|_| "postgres".into()),
            password: std::env::var("DB_PASSWORD").unwrap_or_default(),
            name: std::env::var("DB_NAME").unwrap_or_else(|_| "desa_jambakan".into()),
            max_connections: parse_env("DB_MAX_CONNECTIONS", 10),
        };

        let session = SessionPolicy::from_minutes(
            parse_env("SESSION_IDLE_MINS", DEFAULT_IDLE_TIMEOUT_MINS),
            parse_env("SESSION_WARNING_MINS", DEFAULT_WARNING_LEAD_MINS),
            parse_env("SESSION_MAX_MINS", DEFAULT_MAX_LIFETIME_MINS),
        )
        .unwrap_or_else(|e| panic!("Invalid session configuration: {e}"));

        let upload = UploadConfig {
            dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "public/uploads".into())
                .into(),
            prefix: std::env::var("UPLOAD_PREFIX").unwrap_or_else(|_| "upload".into()),
        };

        let admin = AdminBootstrapConfig {
            username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            password: std::env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
            email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@desajambakan.id".into()),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database,
            jwt: JwtConfig::from_env(),
            session,
            upload,
            admin,
        }
    }
}

/// Read and parse an env var, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid value: {e}")),
        Err(_) => default,
    }
}
