//! Integration tests for post management.

use blog_server::blog::{format_post_date, Blog, Registration};
use blog_server::db::{count_comments_for_post, count_posts, Database, NewPost, User};
use blog_server::error::BlogError;
use tempfile::TempDir;

async fn setup_test_blog() -> (Blog, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path)
        .await
        .expect("Failed to create database");
    (Blog::new(db), temp_dir)
}

async fn register(blog: &Blog, name: &str, email: &str) -> User {
    blog.register(&Registration {
        email: email.to_string(),
        password: "pw".to_string(),
        name: name.to_string(),
    })
    .await
    .expect("Failed to register")
}

fn fields(title: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        subtitle: "A subtitle".to_string(),
        body: "<p>Hello <strong>world</strong></p>".to_string(),
        img_url: "https://images.example.com/header.jpg".to_string(),
    }
}

#[tokio::test]
async fn test_admin_creates_post() {
    let (blog, _temp) = setup_test_blog().await;
    let admin = register(&blog, "Ada", "ada@example.com").await;

    let id = blog
        .create_post(&admin, &fields("First Post"))
        .await
        .expect("create post");
    let post = blog.get_post(id).await.expect("post exists");

    assert_eq!(post.title, "First Post");
    assert_eq!(post.author_id, admin.id);
    assert_eq!(post.author_name, "Ada");
    assert_eq!(post.body, "<p>Hello <strong>world</strong></p>");
    assert_eq!(
        post.date,
        format_post_date(chrono::Local::now().date_naive())
    );
}

#[tokio::test]
async fn test_non_admin_cannot_manage_posts() {
    let (blog, _temp) = setup_test_blog().await;
    let admin = register(&blog, "Ada", "ada@example.com").await;
    let reader = register(&blog, "Bob", "bob@example.com").await;

    let err = blog.create_post(&reader, &fields("Nope")).await.unwrap_err();
    assert!(matches!(err, BlogError::Forbidden));
    assert_eq!(count_posts(blog.db().pool()).await.unwrap(), 0);

    let id = blog.create_post(&admin, &fields("Mine")).await.unwrap();

    let err = blog.edit_post(&reader, id, &fields("Hijacked")).await.unwrap_err();
    assert!(matches!(err, BlogError::Forbidden));

    let err = blog.delete_post(&reader, id).await.unwrap_err();
    assert!(matches!(err, BlogError::Forbidden));

    assert_eq!(blog.get_post(id).await.unwrap().title, "Mine");
}

#[tokio::test]
async fn test_duplicate_title_rejected() {
    let (blog, _temp) = setup_test_blog().await;
    let admin = register(&blog, "Ada", "ada@example.com").await;

    blog.create_post(&admin, &fields("Same")).await.unwrap();
    let err = blog.create_post(&admin, &fields("Same")).await.unwrap_err();
    assert!(matches!(err, BlogError::DuplicateTitle));
    assert_eq!(count_posts(blog.db().pool()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_fields_rejected() {
    let (blog, _temp) = setup_test_blog().await;
    let admin = register(&blog, "Ada", "ada@example.com").await;

    let mut no_title = fields("");
    no_title.title = "   ".to_string();
    let mut bad_url = fields("Bad URL");
    bad_url.img_url = "not a url".to_string();
    let mut ftp_url = fields("FTP");
    ftp_url.img_url = "ftp://example.com/a.jpg".to_string();
    let mut no_body = fields("No body");
    no_body.body = String::new();

    for post in [no_title, bad_url, ftp_url, no_body] {
        let err = blog.create_post(&admin, &post).await.unwrap_err();
        assert!(matches!(err, BlogError::InvalidInput(_)), "got {err:?}");
    }
    assert_eq!(count_posts(blog.db().pool()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_edit_keeps_date_and_author() {
    let (blog, _temp) = setup_test_blog().await;
    let admin = register(&blog, "Ada", "ada@example.com").await;

    let id = blog.create_post(&admin, &fields("Original")).await.unwrap();
    let before = blog.get_post(id).await.unwrap();

    let mut changed = fields("Renamed");
    changed.subtitle = "New subtitle".to_string();
    changed.body = "<p>Rewritten</p>".to_string();
    blog.edit_post(&admin, id, &changed).await.expect("edit");

    let after = blog.get_post(id).await.unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.title, "Renamed");
    assert_eq!(after.subtitle, "New subtitle");
    assert_eq!(after.body, "<p>Rewritten</p>");
    assert_eq!(after.date, before.date);
    assert_eq!(after.author_id, before.author_id);

    // Saving a post under its own title is fine
    blog.edit_post(&admin, id, &changed).await.expect("re-save");
}

#[tokio::test]
async fn test_edit_title_collision_and_missing_post() {
    let (blog, _temp) = setup_test_blog().await;
    let admin = register(&blog, "Ada", "ada@example.com").await;

    blog.create_post(&admin, &fields("Taken")).await.unwrap();
    let id = blog.create_post(&admin, &fields("Other")).await.unwrap();

    let err = blog.edit_post(&admin, id, &fields("Taken")).await.unwrap_err();
    assert!(matches!(err, BlogError::DuplicateTitle));
    assert_eq!(blog.get_post(id).await.unwrap().title, "Other");

    let err = blog.edit_post(&admin, 999, &fields("Ghost")).await.unwrap_err();
    assert!(matches!(err, BlogError::NotFound));
}

#[tokio::test]
async fn test_delete_removes_comments() {
    let (blog, _temp) = setup_test_blog().await;
    let admin = register(&blog, "Ada", "ada@example.com").await;
    let reader = register(&blog, "Bob", "bob@example.com").await;

    let id = blog.create_post(&admin, &fields("Doomed")).await.unwrap();
    blog.add_comment(Some(&reader), id, "first").await.unwrap();
    blog.add_comment(Some(&admin), id, "second").await.unwrap();
    assert_eq!(count_comments_for_post(blog.db().pool(), id).await.unwrap(), 2);

    blog.delete_post(&admin, id).await.expect("delete");

    assert!(matches!(blog.get_post(id).await, Err(BlogError::NotFound)));
    assert_eq!(count_comments_for_post(blog.db().pool(), id).await.unwrap(), 0);

    let err = blog.delete_post(&admin, id).await.unwrap_err();
    assert!(matches!(err, BlogError::NotFound));
}

#[tokio::test]
async fn test_list_posts_in_insertion_order() {
    let (blog, _temp) = setup_test_blog().await;
    let admin = register(&blog, "Ada", "ada@example.com").await;

    assert!(blog.list_posts().await.is_empty());

    for title in ["Zebra", "Apple", "Mango"] {
        blog.create_post(&admin, &fields(title)).await.unwrap();
    }

    let titles: Vec<String> = blog.list_posts().await.into_iter().map(|p| p.title).collect();
    assert_eq!(titles, ["Zebra", "Apple", "Mango"]);
}

#[tokio::test]
async fn test_get_missing_post() {
    let (blog, _temp) = setup_test_blog().await;
    assert!(matches!(blog.get_post(42).await, Err(BlogError::NotFound)));
}

#[tokio::test]
async fn test_listing_degrades_when_store_fails() {
    let (blog, _temp) = setup_test_blog().await;
    let admin = register(&blog, "Ada", "ada@example.com").await;
    blog.create_post(&admin, &fields("Visible")).await.unwrap();
    assert_eq!(blog.list_posts().await.len(), 1);

    blog.db().pool().close().await;

    assert!(blog.list_posts().await.is_empty());
}
