use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Response,
};
use sqlx::SqlitePool;

use super::cookies::session_token;
use super::session::is_expired;
use super::CookieSigner;
use crate::db as queries;
use crate::db::User;
use crate::error::BlogError;
use crate::web::pages;

/// Current authenticated user (if any).
/// Use this extractor when authentication is optional.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
    SqlitePool: FromRef<S>,
    CookieSigner: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = SqlitePool::from_ref(state);
        let signer = CookieSigner::from_ref(state);

        // Unsigned or tampered cookies are ignored
        let Some(token) = session_token(&parts.headers, &signer) else {
            return Ok(MaybeUser(None));
        };

        let session = match queries::get_session_by_token(&pool, token).await {
            Ok(Some(s)) => s,
            Ok(None) => return Ok(MaybeUser(None)),
            Err(e) => {
                tracing::warn!("Session lookup failed: {e:#}");
                return Ok(MaybeUser(None));
            }
        };

        if is_expired(&session.expires_at) {
            // Clean up expired session
            let _ = queries::delete_session(&pool, token).await;
            return Ok(MaybeUser(None));
        }

        let user = match queries::get_user_by_id(&pool, session.user_id).await {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!("User lookup failed: {e:#}");
                None
            }
        };

        Ok(MaybeUser(user))
    }
}

/// Require user to be the blog admin.
/// Responds 403 Forbidden for anonymous and non-admin users alike.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    SqlitePool: FromRef<S>,
    CookieSigner: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let MaybeUser(user) = MaybeUser::from_request_parts(parts, state).await?;

        match user {
            Some(u) if u.is_admin => Ok(RequireAdmin(u)),
            other => {
                tracing::info!(
                    path = %parts.uri.path(),
                    user_id = other.as_ref().map(|u| u.id),
                    "Rejected non-admin request"
                );
                Err(pages::error_response(&BlogError::Forbidden, other.as_ref()))
            }
        }
    }
}
