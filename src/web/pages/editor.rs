//! Create/edit form for posts.

use maud::{html, Markup};

use crate::components::{Alert, BaseLayout, Button, Form, FormGroup, Input, Masthead, TextArea};
use crate::db::{NewPost, User};

#[derive(Debug, Clone)]
pub struct EditorPageParams<'a> {
    pub user: &'a User,
    /// Values to pre-fill; empty for a new post.
    pub fields: &'a NewPost,
    /// Where the form posts to.
    pub action: &'a str,
    pub is_edit: bool,
    pub error: Option<&'a str>,
}

#[must_use]
pub fn render_editor_page(params: &EditorPageParams<'_>) -> Markup {
    let heading = if params.is_edit { "Edit Post" } else { "New Post" };
    let fields = params.fields;

    let content = html! {
        @if let Some(error) = params.error {
            (Alert::error(error))
        }
        (Form::post(params.action, html! {
            (FormGroup::new("Blog Post Title", "title",
                Input::text("title").value(&fields.title).required()))
            (FormGroup::new("Subtitle", "subtitle",
                Input::text("subtitle").value(&fields.subtitle).required()))
            (FormGroup::new("Blog Image URL", "img_url",
                Input::url("img_url").value(&fields.img_url).required())
                .help("An absolute http(s) link to the header image"))
            (FormGroup::new("Blog Content", "body",
                TextArea::new("body").value(&fields.body).rows(16).required())
                .help("HTML is allowed"))
            (Button::submit("Submit Post"))
        }).id("post-editor"))
    };

    BaseLayout::new(heading, Some(params.user))
        .with_masthead(Masthead::new(heading).subheading("You're going to make a great blog post!"))
        .render(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> User {
        User {
            id: 1,
            email: "ada@example.com".to_string(),
            password_hash: String::new(),
            name: "Ada".to_string(),
            is_admin: true,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_new_post_form_is_empty() {
        let user = admin();
        let fields = NewPost::default();
        let html = render_editor_page(&EditorPageParams {
            user: &user,
            fields: &fields,
            action: "/new-post",
            is_edit: false,
            error: None,
        })
        .into_string();

        assert!(html.contains("<h1>New Post</h1>"));
        assert!(html.contains("action=\"/new-post\""));
        assert!(html.contains("name=\"img_url\""));
        assert!(!html.contains("value="));
    }

    #[test]
    fn test_edit_form_is_prefilled() {
        let user = admin();
        let fields = NewPost {
            title: "Old Title".to_string(),
            subtitle: "Old Sub".to_string(),
            body: "<p>Old</p>".to_string(),
            img_url: "https://example.com/old.jpg".to_string(),
        };
        let html = render_editor_page(&EditorPageParams {
            user: &user,
            fields: &fields,
            action: "/edit-post/4",
            is_edit: true,
            error: Some("A post with that title already exists."),
        })
        .into_string();

        assert!(html.contains("<h1>Edit Post</h1>"));
        assert!(html.contains("value=\"Old Title\""));
        assert!(html.contains("value=\"https://example.com/old.jpg\""));
        assert!(html.contains("&lt;p&gt;Old&lt;/p&gt;"));
        assert!(html.contains("A post with that title already exists."));
    }
}
