use thiserror::Error;

/// Failures of the blog's domain operations.
///
/// The web layer decides how each kind is presented: flash + redirect for
/// the user-correctable ones, a status page for the rest.
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("You've already signed up with that email, log in instead!")]
    DuplicateEmail,
    #[error("A post with that title already exists.")]
    DuplicateTitle,
    #[error("Invalid credentials, please try again.")]
    InvalidCredentials,
    #[error("You need to login or register to comment.")]
    AuthRequired,
    #[error("Admin access required")]
    Forbidden,
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Your message could not be queued right now, please try again later.")]
    NotificationUnavailable,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BlogError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Whether an error (possibly wrapped in anyhow context) is a SQLite
/// unique-constraint violation.
pub(crate) fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<sqlx::Error>()
            .and_then(sqlx::Error::as_database_error)
            .is_some_and(|db_err| db_err.is_unique_violation())
    })
}

pub type BlogResult<T> = Result<T, BlogError>;
