use serde::{Deserialize, Serialize};

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub is_admin: bool,
    pub created_at: String,
}

/// A blog post joined with its author's display name.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostWithAuthor {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub subtitle: String,
    /// Creation date, already formatted as "Month DD, YYYY".
    pub date: String,
    /// Admin-authored HTML.
    pub body: String,
    pub img_url: String,
    pub author_name: String,
}

/// Fields for creating or editing a post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
}

impl From<&PostWithAuthor> for NewPost {
    fn from(post: &PostWithAuthor) -> Self {
        Self {
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            body: post.body.clone(),
            img_url: post.img_url.clone(),
        }
    }
}

/// A comment joined with the author fields needed for display.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub text: String,
    pub author_id: i64,
    pub post_id: i64,
    pub created_at: String,
    pub author_name: String,
    pub author_email: String,
}

/// A login session.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub created_at: String,
    pub expires_at: String,
}
