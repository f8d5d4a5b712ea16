use sha2::{Digest, Sha256};
use tracing::info;

use super::Blog;
use crate::db::{self as queries, CommentWithAuthor, User};
use crate::error::{BlogError, BlogResult};

impl Blog {
    /// Add a comment to a post as `actor`.
    ///
    /// The post is looked up first, so a missing post is `NotFound` even for
    /// anonymous visitors.
    ///
    /// # Errors
    ///
    /// `NotFound`, `AuthRequired` without a user, `InvalidInput` for empty
    /// text.
    pub async fn add_comment(
        &self,
        actor: Option<&User>,
        post_id: i64,
        text: &str,
    ) -> BlogResult<i64> {
        let post = self.get_post(post_id).await?;
        let author = actor.ok_or(BlogError::AuthRequired)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(BlogError::invalid("Comment cannot be empty"));
        }

        let id = queries::create_comment(self.db.pool(), post.id, author.id, text).await?;
        info!(comment_id = id, post_id = post.id, user_id = author.id, "Comment added");
        Ok(id)
    }

    /// Comments on a post, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    pub async fn comments_for_post(&self, post_id: i64) -> BlogResult<Vec<CommentWithAuthor>> {
        Ok(queries::get_comments_for_post(self.db.pool(), post_id).await?)
    }
}

/// Gravatar image for an email: size 100, rating g, "retro" fallback.
#[must_use]
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{}?s=100&r=g&d=retro",
        hex::encode(digest)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravatar_url_normalizes_email() {
        let a = gravatar_url("  Someone@Example.com ");
        let b = gravatar_url("someone@example.com");
        assert_eq!(a, b);
        assert!(a.starts_with("https://www.gravatar.com/avatar/"));
        assert!(a.ends_with("?s=100&r=g&d=retro"));

        let hash = a
            .trim_start_matches("https://www.gravatar.com/avatar/")
            .split('?')
            .next()
            .unwrap();
        assert_eq!(hash.len(), 64);
    }
}
