use std::time::Duration;

use tracing::{info, warn};

use super::{required, Blog};
use crate::auth::{generate_session_token, hash_password, session_expiry, verify_password};
use crate::db::{self as queries, User};
use crate::error::{is_unique_violation, BlogError, BlogResult};

/// Registration form fields.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Emails are compared trimmed and lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Blog {
    /// Create an account. The first account ever created becomes the admin.
    ///
    /// # Errors
    ///
    /// `DuplicateEmail` if the email is taken, `InvalidInput` for missing
    /// fields.
    pub async fn register(&self, registration: &Registration) -> BlogResult<User> {
        let email = normalize_email(&required(&registration.email, "Email")?);
        let name = required(&registration.name, "Name")?;
        if registration.password.is_empty() {
            return Err(BlogError::invalid("Password is required"));
        }
        if !email.contains('@') {
            return Err(BlogError::invalid("Please enter a valid email address"));
        }

        let pool = self.db.pool();
        if queries::get_user_by_email(pool, &email).await?.is_some() {
            return Err(BlogError::DuplicateEmail);
        }

        let password_hash = hash_password(&registration.password)?;

        let user_id = match queries::create_user(pool, &email, &password_hash, &name).await {
            Ok(id) => id,
            // Lost a race with a concurrent registration of the same email
            Err(e) if is_unique_violation(&e) => return Err(BlogError::DuplicateEmail),
            Err(e) => return Err(e.into()),
        };

        let user = queries::get_user_by_id(pool, user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User {user_id} vanished after insert"))?;

        info!(user_id = user.id, is_admin = user.is_admin, "User registered");
        Ok(user)
    }

    /// Check credentials.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when the email is unknown or the password does
    /// not match.
    pub async fn login(&self, email: &str, password: &str) -> BlogResult<User> {
        let email = normalize_email(email);

        let Some(user) = queries::get_user_by_email(self.db.pool(), &email).await? else {
            info!("Login failed: unknown email");
            return Err(BlogError::InvalidCredentials);
        };

        let valid = match verify_password(password, &user.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                warn!(user_id = user.id, "Stored password hash is unreadable: {e:#}");
                false
            }
        };

        if !valid {
            info!(user_id = user.id, "Login failed: wrong password");
            return Err(BlogError::InvalidCredentials);
        }

        info!(user_id = user.id, "User logged in");
        Ok(user)
    }

    /// Open a session for `user`, returning its token.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be stored.
    pub async fn start_session(&self, user: &User, ttl: Duration) -> BlogResult<String> {
        let token = generate_session_token();
        let expires_at = session_expiry(ttl);
        queries::create_session(self.db.pool(), user.id, &token, &expires_at).await?;
        Ok(token)
    }

    /// Close the session identified by `token`. Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    pub async fn end_session(&self, token: &str) -> BlogResult<()> {
        queries::delete_session(self.db.pool(), token).await?;
        Ok(())
    }
}
