use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Secret used when `SECRET_KEY` is not set. Fine for local development only.
pub const DEFAULT_SECRET_KEY: &str = "default-dev-key";

const DEFAULT_DATABASE_URL: &str = "sqlite:///posts.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to parse {name} as boolean: {value}")]
    ParseBool { name: String, value: String },
}

/// Where the relational store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// SQLite database file.
    File(PathBuf),
    /// Private in-memory SQLite database (lost on restart).
    Memory,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Sessions
    pub secret_key: String,
    pub session_ttl: Duration,
    pub cookie_secure: bool,

    // Database
    pub database: DatabaseTarget,

    // Contact mail
    pub mail_address: Option<String>,
    pub mail_password: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_timeout: Duration,
    pub contact_queue_capacity: usize,

    // Web Server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a default, so an empty environment yields a
    /// working development configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Sessions
            secret_key: env_or_default("SECRET_KEY", DEFAULT_SECRET_KEY),
            session_ttl: Duration::from_secs(
                parse_env_u64("SESSION_TTL_HOURS", 744)?
                    .checked_mul(3600)
                    .ok_or_else(|| ConfigError::InvalidValue {
                        name: "SESSION_TTL_HOURS".to_string(),
                        message: "too large".to_string(),
                    })?,
            ),
            cookie_secure: parse_env_bool("COOKIE_SECURE", false)?,

            // Database
            database: parse_database_url(&env_or_default("DATABASE_URL", DEFAULT_DATABASE_URL))?,

            // Contact mail
            mail_address: optional_env("EMAIL_KEY"),
            mail_password: optional_env("PASSWORD_KEY"),
            smtp_host: env_or_default("SMTP_HOST", "smtp.gmail.com"),
            smtp_port: parse_env_u16("SMTP_PORT", 465)?,
            smtp_timeout: Duration::from_secs(parse_env_u64("SMTP_TIMEOUT_SECS", 10)?),
            contact_queue_capacity: parse_env_usize("CONTACT_QUEUE_CAPACITY", 64)?,

            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 5001)?,
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_key.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "SECRET_KEY".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.session_ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "SESSION_TTL_HOURS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.contact_queue_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                name: "CONTACT_QUEUE_CAPACITY".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Whether the session secret is still the development default.
    #[must_use]
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

/// Rewrite the legacy `postgres://` scheme to `postgresql://`.
///
/// Hosting platforms still hand out the short form; only the first
/// occurrence at the start of the URL is replaced.
#[must_use]
pub fn normalize_database_url(url: &str) -> String {
    url.strip_prefix("postgres://").map_or_else(
        || url.to_string(),
        |rest| format!("postgresql://{rest}"),
    )
}

/// Parse a `DATABASE_URL` value into a store location.
///
/// Accepts SQLAlchemy-style `sqlite:///relative.db` and
/// `sqlite:////absolute.db`, sqlx-style `sqlite://path` and `sqlite:path`,
/// `sqlite::memory:`, and bare file paths.
///
/// # Errors
///
/// Returns an error for PostgreSQL (no driver in this build) and for any
/// other URL scheme.
pub fn parse_database_url(raw: &str) -> Result<DatabaseTarget, ConfigError> {
    let url = normalize_database_url(raw.trim());

    if url.starts_with("postgresql://") {
        return Err(ConfigError::InvalidValue {
            name: "DATABASE_URL".to_string(),
            message: "PostgreSQL is not supported by this build, use a sqlite:// URL".to_string(),
        });
    }

    if url == "sqlite::memory:" || url == "sqlite://:memory:" {
        return Ok(DatabaseTarget::Memory);
    }

    let path = if let Some(rest) = url.strip_prefix("sqlite:///") {
        // sqlite:////abs keeps its leading slash, sqlite:///rel is relative
        rest.to_string()
    } else if let Some(rest) = url.strip_prefix("sqlite://") {
        rest.to_string()
    } else if let Some(rest) = url.strip_prefix("sqlite:") {
        rest.to_string()
    } else if url.contains("://") {
        return Err(ConfigError::InvalidValue {
            name: "DATABASE_URL".to_string(),
            message: format!("unsupported database URL scheme in '{url}'"),
        });
    } else {
        url
    };

    // Drop query options such as ?mode=rwc
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() {
        return Err(ConfigError::InvalidValue {
            name: "DATABASE_URL".to_string(),
            message: "database path cannot be empty".to_string(),
        });
    }

    Ok(DatabaseTarget::File(PathBuf::from(path)))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::ParseBool {
                name: name.to_string(),
                value: val,
            }),
        },
        _ => Ok(default),
    }
}
