//! Register and login pages.

use maud::{html, Markup};

use crate::components::{Alert, BaseLayout, Button, Form, FormGroup, Input, Masthead};
use crate::web::flash::FlashMessage;

/// Registration values echoed back after a rejected submission.
/// The password is never echoed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisterFormValues<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Render the registration page.
#[must_use]
pub fn render_register_page(
    values: RegisterFormValues<'_>,
    error: Option<&str>,
    flash: Option<&FlashMessage>,
) -> Markup {
    let content = html! {
        div class="auth-container" {
            @if let Some(e) = error {
                (Alert::error(e))
            }
            (Form::post("/register", html! {
                (FormGroup::new("Name", "name",
                    Input::text("name").value(values.name).required().autocomplete("name")))
                (FormGroup::new("Email", "email",
                    Input::email("email").value(values.email).required().autocomplete("email")))
                (FormGroup::new("Password", "password",
                    Input::password("password").required().autocomplete("new-password")))
                (Button::submit("Sign Me Up!"))
            }).id("register-form"))
            p class="auth-switch" {
                "Already have an account? " a href="/login" { "Log in" }
            }
        }
    };

    BaseLayout::new("Register", None)
        .with_flash(flash)
        .with_masthead(Masthead::new("Register").subheading("Start Contributing to the Blog!"))
        .render(content)
}

/// Render the login page. Flashes from failed attempts arrive via `flash`.
#[must_use]
pub fn render_login_page(flash: Option<&FlashMessage>) -> Markup {
    let content = html! {
        div class="auth-container" {
            (Form::post("/login", html! {
                (FormGroup::new("Email", "email",
                    Input::email("email").required().autocomplete("email")))
                (FormGroup::new("Password", "password",
                    Input::password("password").required().autocomplete("current-password")))
                (Button::submit("Let Me In!"))
            }).id("login-form"))
            p class="auth-switch" {
                "New here? " a href="/register" { "Create an account" }
            }
        }
    };

    BaseLayout::new("Login", None)
        .with_flash(flash)
        .with_masthead(Masthead::new("Log In").subheading("Welcome Back!"))
        .render(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::flash::FlashLevel;

    #[test]
    fn test_register_echoes_values_not_password() {
        let html = render_register_page(
            RegisterFormValues {
                name: "Ada",
                email: "ada@example.com",
            },
            Some("Please enter a valid email address"),
            None,
        )
        .into_string();

        assert!(html.contains("action=\"/register\""));
        assert!(html.contains("value=\"Ada\""));
        assert!(html.contains("value=\"ada@example.com\""));
        assert!(html.contains("Please enter a valid email address"));
        assert!(html.contains("type=\"password\""));
    }

    #[test]
    fn test_login_shows_flash() {
        let flash = FlashMessage::new(FlashLevel::Error, "Invalid credentials, please try again.");
        let html = render_login_page(Some(&flash)).into_string();
        assert!(html.contains("action=\"/login\""));
        assert!(html.contains("Invalid credentials, please try again."));
        assert!(html.contains("<a href=\"/register\">Register</a>"));
    }
}
