use chrono::NaiveDate;
use tracing::{error, info};
use url::Url;

use super::{ensure_admin, required, Blog};
use crate::db::{self as queries, NewPost, PostWithAuthor, User};
use crate::error::{is_unique_violation, BlogError, BlogResult};

/// Format a creation date the way posts display it, e.g. "March 05, 2024".
#[must_use]
pub fn format_post_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Trim and check the submitted post fields.
fn validate_post(fields: &NewPost) -> BlogResult<NewPost> {
    let title = required(&fields.title, "Blog post title")?;
    let subtitle = required(&fields.subtitle, "Subtitle")?;
    let img_url = required(&fields.img_url, "Blog image URL")?;
    if fields.body.trim().is_empty() {
        return Err(BlogError::invalid("Blog content is required"));
    }

    let parsed = Url::parse(&img_url)
        .map_err(|_| BlogError::invalid("Blog image URL must be a valid URL"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(BlogError::invalid("Blog image URL must use http or https"));
    }

    Ok(NewPost {
        title,
        subtitle,
        body: fields.body.clone(),
        img_url,
    })
}

impl Blog {
    /// All posts in insertion order.
    ///
    /// A store failure is logged and yields an empty list, so the home page
    /// still renders.
    pub async fn list_posts(&self) -> Vec<PostWithAuthor> {
        match queries::get_all_posts(self.db.pool()).await {
            Ok(posts) => posts,
            Err(e) => {
                error!("Failed to fetch posts: {e:#}");
                Vec::new()
            }
        }
    }

    /// # Errors
    ///
    /// `NotFound` if no post has that ID.
    pub async fn get_post(&self, id: i64) -> BlogResult<PostWithAuthor> {
        queries::get_post(self.db.pool(), id)
            .await?
            .ok_or(BlogError::NotFound)
    }

    /// Publish a new post dated today.
    ///
    /// # Errors
    ///
    /// `Forbidden` for non-admins, `InvalidInput` for bad fields,
    /// `DuplicateTitle` if the title is taken.
    pub async fn create_post(&self, actor: &User, fields: &NewPost) -> BlogResult<i64> {
        ensure_admin(actor)?;
        let post = validate_post(fields)?;
        let date = format_post_date(chrono::Local::now().date_naive());

        let id = queries::create_post(self.db.pool(), actor.id, &post, &date)
            .await
            .map_err(map_title_conflict)?;

        info!(post_id = id, title = %post.title, "Post created");
        Ok(id)
    }

    /// Overwrite a post's title, subtitle, image and body.
    ///
    /// # Errors
    ///
    /// `Forbidden`, `NotFound`, `InvalidInput`, or `DuplicateTitle`.
    pub async fn edit_post(&self, actor: &User, id: i64, fields: &NewPost) -> BlogResult<()> {
        ensure_admin(actor)?;
        let post = validate_post(fields)?;

        let updated = queries::update_post(self.db.pool(), id, &post)
            .await
            .map_err(map_title_conflict)?;
        if !updated {
            return Err(BlogError::NotFound);
        }

        info!(post_id = id, "Post edited");
        Ok(())
    }

    /// Delete a post together with its comments.
    ///
    /// # Errors
    ///
    /// `Forbidden` or `NotFound`.
    pub async fn delete_post(&self, actor: &User, id: i64) -> BlogResult<()> {
        ensure_admin(actor)?;

        if !queries::delete_post(self.db.pool(), id).await? {
            return Err(BlogError::NotFound);
        }

        info!(post_id = id, "Post deleted");
        Ok(())
    }
}

fn map_title_conflict(err: anyhow::Error) -> BlogError {
    if is_unique_violation(&err) {
        BlogError::DuplicateTitle
    } else {
        BlogError::Internal(err)
    }
}
