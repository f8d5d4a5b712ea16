//! Form components shared by the account, editor, comment and contact pages.

use maud::{html, Markup, Render};

/// A POST form wrapping already-rendered fields.
#[derive(Debug)]
pub struct Form<'a> {
    pub action: &'a str,
    pub content: Markup,
    pub class: Option<&'a str>,
    pub id: Option<&'a str>,
}

impl<'a> Form<'a> {
    /// Create a form that posts to `action`.
    #[must_use]
    pub fn post(action: &'a str, content: Markup) -> Self {
        Self {
            action,
            content,
            class: None,
            id: None,
        }
    }

    /// Set the CSS class.
    #[must_use]
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    /// Set the form ID.
    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }
}

impl Render for Form<'_> {
    fn render(&self) -> Markup {
        html! {
            form action=(self.action) method="post" class=[self.class] id=[self.id] novalidate {
                (self.content)
            }
        }
    }
}

/// A single-line input element.
#[derive(Debug, Clone)]
pub struct Input<'a> {
    pub name: &'a str,
    pub r#type: &'a str,
    pub value: Option<&'a str>,
    pub placeholder: Option<&'a str>,
    pub required: bool,
    pub autocomplete: Option<&'a str>,
}

impl<'a> Input<'a> {
    /// Create a new input with the given name and type.
    #[must_use]
    pub fn new(name: &'a str, r#type: &'a str) -> Self {
        Self {
            name,
            r#type,
            value: None,
            placeholder: None,
            required: false,
            autocomplete: None,
        }
    }

    #[must_use]
    pub fn text(name: &'a str) -> Self {
        Self::new(name, "text")
    }

    #[must_use]
    pub fn email(name: &'a str) -> Self {
        Self::new(name, "email")
    }

    /// Password inputs never echo a value back.
    #[must_use]
    pub fn password(name: &'a str) -> Self {
        Self::new(name, "password")
    }

    #[must_use]
    pub fn url(name: &'a str) -> Self {
        Self::new(name, "url")
    }

    #[must_use]
    pub fn tel(name: &'a str) -> Self {
        Self::new(name, "tel")
    }

    /// Set the value. Empty strings render no attribute.
    #[must_use]
    pub fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value).filter(|v| !v.is_empty());
        self
    }

    /// Set the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Mark as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the autocomplete attribute.
    #[must_use]
    pub fn autocomplete(mut self, autocomplete: &'a str) -> Self {
        self.autocomplete = Some(autocomplete);
        self
    }
}

impl Render for Input<'_> {
    fn render(&self) -> Markup {
        let value = if self.r#type == "password" {
            None
        } else {
            self.value
        };
        html! {
            input
                type=(self.r#type)
                name=(self.name)
                id=(self.name)
                value=[value]
                placeholder=[self.placeholder]
                required[self.required]
                autocomplete=[self.autocomplete];
        }
    }
}

/// A multi-line text area.
#[derive(Debug)]
pub struct TextArea<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
    pub placeholder: Option<&'a str>,
    pub rows: Option<u32>,
    pub required: bool,
}

impl<'a> TextArea<'a> {
    #[must_use]
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            value: None,
            placeholder: None,
            rows: None,
            required: false,
        }
    }

    #[must_use]
    pub fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    #[must_use]
    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl Render for TextArea<'_> {
    fn render(&self) -> Markup {
        html! {
            textarea
                name=(self.name)
                id=(self.name)
                placeholder=[self.placeholder]
                rows=[self.rows]
                required[self.required]
            {
                @if let Some(value) = self.value {
                    (value)
                }
            }
        }
    }
}

/// A label + control pair, with an optional hint underneath.
#[derive(Debug)]
pub struct FormGroup<'a> {
    pub label: &'a str,
    /// Must match the control's `id` (which is its `name`).
    pub id: &'a str,
    pub input: Markup,
    pub help: Option<&'a str>,
}

impl<'a> FormGroup<'a> {
    #[must_use]
    pub fn new(label: &'a str, id: &'a str, input: impl Render) -> Self {
        Self {
            label,
            id,
            input: input.render(),
            help: None,
        }
    }

    /// Add help text.
    #[must_use]
    pub fn help(mut self, help: &'a str) -> Self {
        self.help = Some(help);
        self
    }
}

impl Render for FormGroup<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="form-group" {
                label for=(self.id) { (self.label) }
                (self.input)
                @if let Some(help) = self.help {
                    small { (help) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_posts_to_action() {
        let html = Form::post("/login", html! { "fields" })
            .id("login-form")
            .render()
            .into_string();
        assert!(html.contains("action=\"/login\""));
        assert!(html.contains("method=\"post\""));
        assert!(html.contains("id=\"login-form\""));
        assert!(html.contains("fields"));
    }

    #[test]
    fn test_input_renders_value_and_flags() {
        let html = Input::email("email")
            .value("ada@example.com")
            .required()
            .autocomplete("email")
            .render()
            .into_string();
        assert!(html.contains("type=\"email\""));
        assert!(html.contains("name=\"email\""));
        assert!(html.contains("id=\"email\""));
        assert!(html.contains("value=\"ada@example.com\""));
        assert!(html.contains("required"));
        assert!(html.contains("autocomplete=\"email\""));
    }

    #[test]
    fn test_empty_value_renders_no_attribute() {
        let html = Input::text("title").value("").render().into_string();
        assert!(!html.contains("value="));
    }

    #[test]
    fn test_password_never_echoes_value() {
        let html = Input::password("password")
            .value("hunter2")
            .render()
            .into_string();
        assert!(!html.contains("hunter2"));
    }

    #[test]
    fn test_input_value_is_escaped() {
        let html = Input::text("title")
            .value("\"><script>")
            .render()
            .into_string();
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_textarea_content() {
        let html = TextArea::new("body")
            .value("<p>Hello</p>")
            .rows(10)
            .render()
            .into_string();
        assert!(html.contains("<textarea"));
        assert!(html.contains("rows=\"10\""));
        assert!(html.contains("&lt;p&gt;Hello&lt;/p&gt;"));
    }

    #[test]
    fn test_form_group_links_label() {
        let html = FormGroup::new("Blog Post Title", "title", Input::text("title"))
            .help("Must be unique")
            .render()
            .into_string();
        assert!(html.contains("<label for=\"title\">Blog Post Title</label>"));
        assert!(html.contains("<small>Must be unique</small>"));
    }
}
