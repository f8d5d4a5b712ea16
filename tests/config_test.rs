//! Integration tests for environment-driven configuration.

use std::path::PathBuf;
use std::time::Duration;

use blog_server::config::{Config, DatabaseTarget, DEFAULT_SECRET_KEY};
use serial_test::serial;

const VARS: &[&str] = &[
    "SECRET_KEY",
    "DATABASE_URL",
    "EMAIL_KEY",
    "PASSWORD_KEY",
    "SMTP_HOST",
    "SMTP_PORT",
    "SMTP_TIMEOUT_SECS",
    "WEB_HOST",
    "WEB_PORT",
    "SESSION_TTL_HOURS",
    "COOKIE_SECURE",
    "CONTACT_QUEUE_CAPACITY",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_from_empty_environment() {
    clear_env();

    let config = Config::from_env().expect("defaults load");
    config.validate().expect("defaults are valid");

    assert_eq!(config.secret_key, DEFAULT_SECRET_KEY);
    assert!(config.uses_default_secret());
    assert_eq!(config.database, DatabaseTarget::File(PathBuf::from("posts.db")));
    assert_eq!(config.mail_address, None);
    assert_eq!(config.smtp_host, "smtp.gmail.com");
    assert_eq!(config.smtp_port, 465);
    assert_eq!(config.smtp_timeout, Duration::from_secs(10));
    assert_eq!(config.web_host, "0.0.0.0");
    assert_eq!(config.web_port, 5001);
    assert_eq!(config.session_ttl, Duration::from_secs(744 * 3600));
    assert!(!config.cookie_secure);
    assert_eq!(config.contact_queue_capacity, 64);
}

#[test]
#[serial]
fn test_overrides_from_environment() {
    clear_env();
    std::env::set_var("SECRET_KEY", "s3cret");
    std::env::set_var("DATABASE_URL", "sqlite:////var/lib/blog/posts.db");
    std::env::set_var("EMAIL_KEY", "me@example.com");
    std::env::set_var("PASSWORD_KEY", "app-password");
    std::env::set_var("SMTP_PORT", "587");
    std::env::set_var("WEB_PORT", "8080");
    std::env::set_var("SESSION_TTL_HOURS", "2");
    std::env::set_var("COOKIE_SECURE", "yes");

    let config = Config::from_env().expect("overrides load");
    clear_env();

    assert!(!config.uses_default_secret());
    assert_eq!(
        config.database,
        DatabaseTarget::File(PathBuf::from("/var/lib/blog/posts.db"))
    );
    assert_eq!(config.mail_address.as_deref(), Some("me@example.com"));
    assert_eq!(config.mail_password.as_deref(), Some("app-password"));
    assert_eq!(config.smtp_port, 587);
    assert_eq!(config.web_port, 8080);
    assert_eq!(config.session_ttl, Duration::from_secs(7200));
    assert!(config.cookie_secure);
}

#[test]
#[serial]
fn test_bad_values_are_errors() {
    clear_env();
    std::env::set_var("WEB_PORT", "not-a-port");
    assert!(Config::from_env().is_err());

    clear_env();
    std::env::set_var("COOKIE_SECURE", "maybe");
    assert!(Config::from_env().is_err());

    clear_env();
    std::env::set_var("DATABASE_URL", "postgres://u:p@db.example.com/blog");
    assert!(Config::from_env().is_err());

    clear_env();
    std::env::set_var("SESSION_TTL_HOURS", u64::MAX.to_string());
    assert!(Config::from_env().is_err());

    clear_env();
    std::env::set_var("SESSION_TTL_HOURS", "0");
    let config = Config::from_env().expect("parses");
    assert!(config.validate().is_err());

    clear_env();
}
