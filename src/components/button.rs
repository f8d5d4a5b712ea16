//! Button component.
//!
//! Renders as a `<button>` or, when an href is set, an `<a>` styled the same.

use maud::{html, Markup, Render};

/// Button style variants matching CSS classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    /// Compact inline control, used for per-post admin actions.
    Small,
}

impl ButtonVariant {
    /// Returns the CSS class(es) for this variant.
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Self::Primary => "btn btn-primary",
            Self::Small => "btn btn-sm",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Button<'a> {
    pub label: &'a str,
    pub variant: ButtonVariant,
    /// Renders as `<a>` if present.
    pub href: Option<&'a str>,
    pub r#type: Option<&'a str>,
    pub class: Option<&'a str>,
    pub onclick: Option<&'a str>,
}

impl<'a> Button<'a> {
    #[must_use]
    pub fn new(label: &'a str, variant: ButtonVariant) -> Self {
        Self {
            label,
            variant,
            href: None,
            r#type: None,
            class: None,
            onclick: None,
        }
    }

    #[must_use]
    pub fn primary(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Primary)
    }

    #[must_use]
    pub fn small(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Small)
    }

    /// A primary `<button type="submit">`.
    #[must_use]
    pub fn submit(label: &'a str) -> Self {
        Self::primary(label).r#type("submit")
    }

    #[must_use]
    pub fn href(mut self, href: &'a str) -> Self {
        self.href = Some(href);
        self
    }

    #[must_use]
    pub fn r#type(mut self, r#type: &'a str) -> Self {
        self.r#type = Some(r#type);
        self
    }

    /// Adds additional CSS classes.
    #[must_use]
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    #[must_use]
    pub fn onclick(mut self, onclick: &'a str) -> Self {
        self.onclick = Some(onclick);
        self
    }

    fn build_class(&self) -> String {
        let mut classes = self.variant.class().to_string();
        if let Some(extra) = self.class {
            classes.push(' ');
            classes.push_str(extra);
        }
        classes
    }
}

impl Render for Button<'_> {
    fn render(&self) -> Markup {
        let classes = self.build_class();

        if let Some(href) = self.href {
            html! {
                a class=(classes) href=(href) onclick=[self.onclick] {
                    (self.label)
                }
            }
        } else {
            html! {
                button
                    class=(classes)
                    type=(self.r#type.unwrap_or("button"))
                    onclick=[self.onclick]
                {
                    (self.label)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_button() {
        let html = Button::primary("Click me").render().into_string();
        assert!(html.contains("btn btn-primary"));
        assert!(html.contains("Click me"));
        assert!(html.contains("<button"));
        assert!(html.contains("type=\"button\""));
    }

    #[test]
    fn test_submit_button() {
        let html = Button::submit("Sign Me Up!").render().into_string();
        assert!(html.contains("type=\"submit\""));
        assert!(html.contains("btn-primary"));
    }

    #[test]
    fn test_button_with_href() {
        let html = Button::primary("Create New Post")
            .href("/new-post")
            .render()
            .into_string();
        assert!(html.contains("<a"));
        assert!(html.contains("href=\"/new-post\""));
        assert!(!html.contains("<button"));
    }

    #[test]
    fn test_small_submit_with_confirm() {
        let html = Button::small("Delete")
            .r#type("submit")
            .class("btn-delete")
            .onclick("return confirm('Delete this post?')")
            .render()
            .into_string();
        assert!(html.contains("class=\"btn btn-sm btn-delete\""));
        assert!(html.contains("type=\"submit\""));
        assert!(html.contains("onclick=\"return confirm('Delete this post?')\""));
    }

    #[test]
    fn test_button_variant_classes() {
        assert_eq!(ButtonVariant::Primary.class(), "btn btn-primary");
        assert_eq!(ButtonVariant::Small.class(), "btn btn-sm");
    }
}
