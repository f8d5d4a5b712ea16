//! Contact page and its send confirmation.

use maud::{html, Markup};

use crate::components::{Alert, BaseLayout, Button, Form, FormGroup, Input, Masthead, TextArea};
use crate::db::User;
use crate::web::flash::FlashMessage;

/// Submitted fields echoed back when the form is re-rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactFormValues<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContactPageParams<'a> {
    pub user: Option<&'a User>,
    pub flash: Option<&'a FlashMessage>,
    /// The message was accepted for delivery.
    pub sent: bool,
    pub error: Option<&'a str>,
    pub values: ContactFormValues<'a>,
}

#[must_use]
pub fn render_contact_page(params: ContactPageParams<'_>) -> Markup {
    let heading = if params.sent {
        "Successfully sent your message"
    } else {
        "Contact Me"
    };

    let values = params.values;
    let content = html! {
        @if params.sent {
            (Alert::success("Thanks! Your message is on its way."))
        }
        @if let Some(e) = params.error {
            (Alert::error(e))
        }
        p { "Want to get in touch? Fill out the form below to send me a message and I will get back to you as soon as possible!" }
        (Form::post("/contact", html! {
            (FormGroup::new("Name", "name",
                Input::text("name").value(values.name).required().autocomplete("name")))
            (FormGroup::new("Email Address", "email",
                Input::email("email").value(values.email).required().autocomplete("email")))
            (FormGroup::new("Phone Number", "phone",
                Input::tel("phone").value(values.phone).autocomplete("tel")))
            (FormGroup::new("Message", "message",
                TextArea::new("message").value(values.message).rows(5).required()))
            (Button::submit("Send"))
        }).id("contact-form"))
    };

    BaseLayout::new("Contact", params.user)
        .with_flash(params.flash)
        .with_masthead(Masthead::new(heading).subheading("Have questions? I have answers."))
        .render(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_heading_tracks_sent() {
        let fresh = render_contact_page(ContactPageParams::default()).into_string();
        assert!(fresh.contains("<h1>Contact Me</h1>"));

        let sent = render_contact_page(ContactPageParams {
            sent: true,
            ..ContactPageParams::default()
        })
        .into_string();
        assert!(sent.contains("<h1>Successfully sent your message</h1>"));
        assert!(sent.contains("class=\"success\""));
    }

    #[test]
    fn test_contact_echoes_values() {
        let html = render_contact_page(ContactPageParams {
            error: Some("Name, email and message are required."),
            values: ContactFormValues {
                name: "Carol",
                email: "",
                phone: "555-0100",
                message: "Hi <there>",
            },
            ..ContactPageParams::default()
        })
        .into_string();
        assert!(html.contains("value=\"Carol\""));
        assert!(html.contains("value=\"555-0100\""));
        assert!(html.contains("Hi &lt;there&gt;</textarea>"));
    }

    #[test]
    fn test_contact_error_alert() {
        let html = render_contact_page(ContactPageParams {
            error: Some("Your message could not be queued right now, please try again later."),
            ..ContactPageParams::default()
        })
        .into_string();
        assert!(html.contains("class=\"error\""));
        assert!(!html.contains("Successfully sent"));
    }
}
