//! Single post page with its comments and the comment form.

use maud::{html, Markup, PreEscaped};

use crate::blog::gravatar_url;
use crate::components::{Alert, BaseLayout, Button, Form, Masthead, TextArea};
use crate::db::{CommentWithAuthor, PostWithAuthor, User};
use crate::web::flash::FlashMessage;

/// Parameters for the post page.
#[derive(Debug, Clone)]
pub struct PostPageParams<'a> {
    pub post: &'a PostWithAuthor,
    pub comments: &'a [CommentWithAuthor],
    pub user: Option<&'a User>,
    pub flash: Option<&'a FlashMessage>,
    /// Error from a rejected comment submission, shown above the form.
    pub comment_error: Option<&'a str>,
    /// Text to put back into the comment box after a rejected submission.
    pub comment_draft: Option<&'a str>,
}

/// Render a post, its comments, and the comment form.
///
/// The post body is admin-authored HTML and is emitted as-is. Comment text
/// comes from any registered user and is always escaped.
#[must_use]
pub fn render_post_page(params: &PostPageParams<'_>) -> Markup {
    let post = params.post;
    let is_admin = params.user.is_some_and(|u| u.is_admin);
    let action = format!("/post/{}", post.id);
    let edit_href = format!("/edit-post/{}", post.id);

    let meta = html! { "Posted by " (post.author_name) " on " (post.date) };

    let mut comment_box = TextArea::new("comment_text")
        .placeholder("Leave a comment")
        .rows(4)
        .required();
    if let Some(draft) = params.comment_draft {
        comment_box = comment_box.value(draft);
    }

    let content = html! {
        article class="post-body" {
            (PreEscaped(&post.body))
        }

        @if is_admin {
            div class="clearfix" {
                (Button::primary("Edit Post").href(&edit_href).class("float-right"))
            }
        }

        section class="comments" {
            @if let Some(error) = params.comment_error {
                (Alert::error(error))
            }
            (Form::post(&action, html! {
                (comment_box)
                (Button::submit("Submit Comment"))
            }).id("comment-form"))

            ul class="comment-list" {
                @for comment in params.comments {
                    li class="comment" {
                        img class="comment-avatar" src=(gravatar_url(&comment.author_email)) alt="";
                        div class="comment-text" {
                            p { (comment.text) }
                            span class="comment-author" { (comment.author_name) }
                        }
                    }
                }
            }
        }
    };

    BaseLayout::new(&post.title, params.user)
        .with_flash(params.flash)
        .with_masthead(
            Masthead::new(&post.title)
                .subheading(&post.subtitle)
                .meta(meta)
                .image(&post.img_url),
        )
        .render(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> PostWithAuthor {
        PostWithAuthor {
            id: 3,
            author_id: 1,
            title: "Hello".to_string(),
            subtitle: "World".to_string(),
            date: "March 05, 2024".to_string(),
            body: "<p><em>Rich</em> body</p>".to_string(),
            img_url: "https://example.com/bg.jpg".to_string(),
            author_name: "Ada".to_string(),
        }
    }

    fn comment(text: &str) -> CommentWithAuthor {
        CommentWithAuthor {
            id: 1,
            text: text.to_string(),
            author_id: 2,
            post_id: 3,
            created_at: String::new(),
            author_name: "Bob".to_string(),
            author_email: "bob@example.com".to_string(),
        }
    }

    fn params<'a>(post: &'a PostWithAuthor, comments: &'a [CommentWithAuthor]) -> PostPageParams<'a> {
        PostPageParams {
            post,
            comments,
            user: None,
            flash: None,
            comment_error: None,
            comment_draft: None,
        }
    }

    #[test]
    fn test_body_is_raw_html() {
        let post = post();
        let html = render_post_page(&params(&post, &[])).into_string();
        assert!(html.contains("<p><em>Rich</em> body</p>"));
        assert!(html.contains("Posted by Ada on March 05, 2024"));
        assert!(html.contains("https://example.com/bg.jpg"));
        assert!(html.contains("action=\"/post/3\""));
        assert!(!html.contains("/edit-post/3"));
    }

    #[test]
    fn test_comments_are_escaped() {
        let post = post();
        let comments = [comment("<script>alert(1)</script>")];
        let html = render_post_page(&params(&post, &comments)).into_string();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Bob"));
        let avatar = gravatar_url("bob@example.com");
        assert!(html.contains(avatar.split('?').next().unwrap()));
    }

    #[test]
    fn test_comment_error_keeps_draft() {
        let post = post();
        let mut p = params(&post, &[]);
        p.comment_error = Some("Comment cannot be empty");
        p.comment_draft = Some("half a thought");
        let html = render_post_page(&p).into_string();
        assert!(html.contains("Comment cannot be empty"));
        assert!(html.contains("half a thought"));
    }
}
