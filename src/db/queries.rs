use anyhow::{Context, Result};
use sqlx::SqlitePool;

use super::models::{CommentWithAuthor, NewPost, PostWithAuthor, Session, User};

const POST_WITH_AUTHOR_SELECT: &str = r"
    SELECT p.id, p.author_id, p.title, p.subtitle, p.date, p.body, p.img_url,
           u.name AS author_name
    FROM posts p
    JOIN users u ON u.id = p.author_id
";

// ========== Users ==========

/// Create a user. The very first account is made admin inside the same
/// statement, so two racing registrations cannot both become admin.
pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    name: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r"
        INSERT INTO users (email, password_hash, name, is_admin)
        VALUES (?, ?, ?, NOT EXISTS (SELECT 1 FROM users))
        ",
    )
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .execute(pool)
    .await
    .context("Failed to create user")?;

    Ok(result.last_insert_rowid())
}

/// Get a user by ID.
pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
    sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch user by id")
}

/// Get a user by email.
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch user by email")
}

/// Count total users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .context("Failed to count users")?;
    Ok(row.0)
}

// ========== Posts ==========

/// Insert a post and return its ID.
pub async fn create_post(
    pool: &SqlitePool,
    author_id: i64,
    post: &NewPost,
    date: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r"
        INSERT INTO posts (author_id, title, subtitle, date, body, img_url)
        VALUES (?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(author_id)
    .bind(&post.title)
    .bind(&post.subtitle)
    .bind(date)
    .bind(&post.body)
    .bind(&post.img_url)
    .execute(pool)
    .await
    .context("Failed to create post")?;

    Ok(result.last_insert_rowid())
}

/// Get a post with its author name.
pub async fn get_post(pool: &SqlitePool, id: i64) -> Result<Option<PostWithAuthor>> {
    sqlx::query_as(&format!("{POST_WITH_AUTHOR_SELECT} WHERE p.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch post")
}

/// Get every post in insertion order.
pub async fn get_all_posts(pool: &SqlitePool) -> Result<Vec<PostWithAuthor>> {
    sqlx::query_as(&format!("{POST_WITH_AUTHOR_SELECT} ORDER BY p.id"))
        .fetch_all(pool)
        .await
        .context("Failed to fetch posts")
}

/// Count posts.
pub async fn count_posts(pool: &SqlitePool) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await
        .context("Failed to count posts")?;
    Ok(row.0)
}

/// Overwrite the editable fields of a post. Date and author are untouched.
///
/// Returns false if no post has that ID.
pub async fn update_post(pool: &SqlitePool, id: i64, post: &NewPost) -> Result<bool> {
    let result = sqlx::query(
        r"
        UPDATE posts
        SET title = ?, subtitle = ?, body = ?, img_url = ?
        WHERE id = ?
        ",
    )
    .bind(&post.title)
    .bind(&post.subtitle)
    .bind(&post.body)
    .bind(&post.img_url)
    .bind(id)
    .execute(pool)
    .await
    .context("Failed to update post")?;

    Ok(result.rows_affected() > 0)
}

/// Delete a post. Its comments go with it (ON DELETE CASCADE).
///
/// Returns false if no post has that ID.
pub async fn delete_post(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete post")?;

    Ok(result.rows_affected() > 0)
}

// ========== Comments ==========

/// Insert a comment and return its ID.
pub async fn create_comment(
    pool: &SqlitePool,
    post_id: i64,
    author_id: i64,
    text: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r"
        INSERT INTO comments (post_id, author_id, text)
        VALUES (?, ?, ?)
        ",
    )
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .execute(pool)
    .await
    .context("Failed to create comment")?;

    Ok(result.last_insert_rowid())
}

/// Get a post's comments with their authors, oldest first.
pub async fn get_comments_for_post(
    pool: &SqlitePool,
    post_id: i64,
) -> Result<Vec<CommentWithAuthor>> {
    sqlx::query_as(
        r"
        SELECT c.id, c.text, c.author_id, c.post_id, c.created_at,
               u.name AS author_name, u.email AS author_email
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = ?
        ORDER BY c.id
        ",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
    .context("Failed to fetch comments for post")
}

/// Count comments on a post.
pub async fn count_comments_for_post(pool: &SqlitePool, post_id: i64) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(pool)
        .await
        .context("Failed to count comments")?;
    Ok(row.0)
}

// ========== Sessions ==========

/// Create a session.
pub async fn create_session(
    pool: &SqlitePool,
    user_id: i64,
    token: &str,
    expires_at: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r"
        INSERT INTO sessions (user_id, token, expires_at)
        VALUES (?, ?, ?)
        ",
    )
    .bind(user_id)
    .bind(token)
    .bind(expires_at)
    .execute(pool)
    .await
    .context("Failed to create session")?;

    Ok(result.last_insert_rowid())
}

/// Get a session by token.
pub async fn get_session_by_token(pool: &SqlitePool, token: &str) -> Result<Option<Session>> {
    sqlx::query_as("SELECT * FROM sessions WHERE token = ?")
        .bind(token)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch session by token")
}

/// Delete a session.
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await
        .context("Failed to delete session")?;
    Ok(())
}

/// Count sessions belonging to a user.
pub async fn count_user_sessions(pool: &SqlitePool, user_id: i64) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .context("Failed to count user sessions")?;
    Ok(row.0)
}
