//! Home page: the list of posts.

use maud::{html, Markup};

use crate::components::{BaseLayout, Button, Masthead, SITE_NAME};
use crate::db::{PostWithAuthor, User};
use crate::web::flash::FlashMessage;

/// Render the home page listing every post.
///
/// Admins additionally get a delete control per post and a "Create New
/// Post" button.
#[must_use]
pub fn render_home_page(
    posts: &[PostWithAuthor],
    user: Option<&User>,
    flash: Option<&FlashMessage>,
) -> Markup {
    let is_admin = user.is_some_and(|u| u.is_admin);

    let content = html! {
        div class="post-list" {
            @if posts.is_empty() {
                p class="empty-state" { "No posts yet." }
            }
            @for post in posts {
                (render_post_preview(post, is_admin))
                hr;
            }
            @if is_admin {
                div class="clearfix" {
                    (Button::primary("Create New Post").href("/new-post").class("float-right"))
                }
            }
        }
    };

    BaseLayout::new("Home", user)
        .with_flash(flash)
        .with_masthead(Masthead::new(SITE_NAME).subheading("A collection of random musings."))
        .render(content)
}

fn render_post_preview(post: &PostWithAuthor, is_admin: bool) -> Markup {
    let href = format!("/post/{}", post.id);
    let delete_action = format!("/delete/{}", post.id);

    html! {
        div class="post-preview" {
            a href=(href) {
                h2 class="post-title" { (post.title) }
                h3 class="post-subtitle" { (post.subtitle) }
            }
            p class="post-meta" {
                "Posted by " (post.author_name) " on " (post.date)
                @if is_admin {
                    form class="inline" action=(delete_action) method="post" {
                        (Button::small("✘")
                            .r#type("submit")
                            .class("btn-delete")
                            .onclick("return confirm('Delete this post and all of its comments?')"))
                    }
                }
            }
        }
    }
}
