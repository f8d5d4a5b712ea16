//! Blog domain operations.
//!
//! Everything here is independent of HTTP: handlers pass in the acting user
//! (if any) and plain field values, and get back data or a [`BlogError`].

mod accounts;
mod comments;
mod posts;

pub use accounts::Registration;
pub use comments::gravatar_url;
pub use posts::format_post_date;

use crate::db::{Database, User};
use crate::error::{BlogError, BlogResult};

/// Entry point for the blog's domain operations.
#[derive(Debug, Clone)]
pub struct Blog {
    db: Database,
}

impl Blog {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }
}

/// Only the admin account may manage posts.
fn ensure_admin(actor: &User) -> BlogResult<()> {
    if actor.is_admin {
        Ok(())
    } else {
        Err(BlogError::Forbidden)
    }
}

/// Trim a required text field, failing with a message naming it.
fn required(value: &str, field: &str) -> BlogResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BlogError::invalid(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
