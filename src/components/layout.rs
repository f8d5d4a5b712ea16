//! Base layout components for the web UI.
//!
//! This module provides the main page layout structure including
//! the HTML skeleton, navigation, masthead, and footer.

use maud::{html, Markup, DOCTYPE};

use super::alert::Alert;
use crate::db::User;
use crate::web::flash::FlashMessage;

/// Name shown in the navigation bar, page titles and footer.
pub const SITE_NAME: &str = "Rudra's Blog";

/// Large heading block at the top of a page.
#[derive(Debug, Clone)]
pub struct Masthead<'a> {
    pub heading: &'a str,
    pub subheading: Option<&'a str>,
    /// Extra line below the subheading, e.g. "Posted by ... on ...".
    pub meta: Option<Markup>,
    /// Background image URL; without one the stylesheet's gradient shows.
    pub image: Option<&'a str>,
}

impl<'a> Masthead<'a> {
    #[must_use]
    pub fn new(heading: &'a str) -> Self {
        Self {
            heading,
            subheading: None,
            meta: None,
            image: None,
        }
    }

    #[must_use]
    pub fn subheading(mut self, subheading: &'a str) -> Self {
        self.subheading = Some(subheading);
        self
    }

    #[must_use]
    pub fn meta(mut self, meta: Markup) -> Self {
        self.meta = Some(meta);
        self
    }

    #[must_use]
    pub fn image(mut self, image: &'a str) -> Self {
        self.image = Some(image);
        self
    }

    fn render(&self) -> Markup {
        let style = self
            .image
            .map(|image| format!("background-image: url('{}')", css_url(image)));
        html! {
            header class="masthead" style=[style] {
                div class="masthead-overlay" {
                    div class="container masthead-heading" {
                        h1 { (self.heading) }
                        @if let Some(sub) = self.subheading {
                            p class="subheading" { (sub) }
                        }
                        @if let Some(ref meta) = self.meta {
                            p class="meta" { (meta) }
                        }
                    }
                }
            }
        }
    }
}

/// Percent-encode the characters that could close a quoted CSS `url()`.
fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if matches!(c, '\'' | '"' | '(' | ')' | '\\') || c.is_ascii_whitespace() || c.is_ascii_control() {
            out.push_str(&format!("%{:02X}", u32::from(c)));
        } else {
            out.push(c);
        }
    }
    out
}

/// Base page layout builder.
///
/// Provides a fluent interface for constructing the main page layout
/// with required user context for authentication-aware navigation.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h1 { "Hello World" } };
/// let page = BaseLayout::new("My Page", user.as_ref())
///     .render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    user: Option<&'a User>,
    flash: Option<&'a FlashMessage>,
    masthead: Option<Masthead<'a>>,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title and user.
    ///
    /// Pass `None` for anonymous visitors.
    #[must_use]
    pub fn new(title: &'a str, user: Option<&'a User>) -> Self {
        Self {
            title,
            user,
            flash: None,
            masthead: None,
        }
    }

    /// Show a one-time flash message above the content.
    #[must_use]
    pub fn with_flash(mut self, flash: Option<&'a FlashMessage>) -> Self {
        self.flash = flash;
        self
    }

    #[must_use]
    pub fn with_masthead(mut self, masthead: Masthead<'a>) -> Self {
        self.masthead = Some(masthead);
        self
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content will be placed inside the `<main class="container">` element.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (self.title) " - " (SITE_NAME) }
                    link rel="stylesheet" href="/static/css/style.css";
                }
                body {
                    (self.render_nav())
                    @if let Some(ref masthead) = self.masthead {
                        (masthead.render())
                    }
                    main class="container" {
                        @if let Some(flash) = self.flash {
                            (Alert::new(flash.level.alert_variant(), &flash.message))
                        }
                        (content)
                    }
                    (Self::render_footer())
                }
            }
        }
    }

    /// Render the navigation bar.
    fn render_nav(&self) -> Markup {
        html! {
            nav class="site-nav" {
                div class="container" {
                    a class="site-logo" href="/" { (SITE_NAME) }
                    ul {
                        li { a href="/" { "Home" } }
                        (self.render_auth_nav())
                        li { a href="/about" { "About" } }
                        li { a href="/contact" { "Contact" } }
                    }
                }
            }
        }
    }

    /// Render authentication-related navigation items.
    fn render_auth_nav(&self) -> Markup {
        match self.user {
            Some(u) if u.is_admin => html! {
                li { a href="/new-post" { "New Post" } }
                li { a href="/logout" { "Log Out" } }
            },
            Some(_) => html! {
                li { a href="/logout" { "Log Out" } }
            },
            None => html! {
                li { a href="/login" { "Login" } }
                li { a href="/register" { "Register" } }
            },
        }
    }

    /// Render the page footer.
    fn render_footer() -> Markup {
        let year = chrono::Local::now().format("%Y").to_string();
        html! {
            footer class="container" {
                small { "Copyright © " (SITE_NAME) " " (year) }
            }
        }
    }
}
